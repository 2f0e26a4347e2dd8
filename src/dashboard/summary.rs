use serde_json::json;
use serde_json::Map as JSMap;
use snafu::prelude::*;
use text_diff::print_diff;

use crate::dashboard::*;

pub fn student_to_json(s: &StudentEntity) -> JSValue {
    let mut history: JSMap<String, JSValue> = JSMap::new();
    for (year, entry) in s.history.iter() {
        history.insert(
            year.clone(),
            json!({"grade": entry.grade, "course": entry.course}),
        );
    }
    json!({
        "id": s.identity,
        "name": s.display_name,
        "history": history,
        "years_enrolled": s.years_enrolled,
    })
}

pub fn program_result_to_json(res: &ProgramResult) -> JSValue {
    let students: Vec<JSValue> = res.students.iter().map(student_to_json).collect();
    json!({"years": res.years, "students": students})
}

pub fn build_dashboard_js(schools_js: JSValue) -> JSValue {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    json!({
        "metadata": {"generated_at": generated_at},
        "schools": schools_js,
    })
}

pub fn read_reference(path: &str) -> DashboardResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Compares the schools section with the one of a reference dashboard file.
/// The generation metadata is ignored.
pub fn compare_with_reference(schools_js: &JSValue, reference_path: &str) -> DashboardResult<()> {
    let reference = read_reference(reference_path)?;
    let pretty_ref =
        serde_json::to_string_pretty(&reference["schools"]).context(ParsingJsonSnafu {})?;
    let pretty_computed = serde_json::to_string_pretty(schools_js).context(ParsingJsonSnafu {})?;
    if pretty_ref != pretty_computed {
        warn!("Found differences with the reference dashboard");
        print_diff(pretty_ref.as_str(), pretty_computed.as_str(), "\n");
        whatever!("Difference detected between computed dashboard and reference dashboard")
    }
    info!("The dashboard matches the reference {}", reference_path);
    Ok(())
}
