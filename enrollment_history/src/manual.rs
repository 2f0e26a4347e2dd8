/*!

This is the long-form manual for `enrollment_history` and `enrolldash`.

## Expected input

Every program of a school (Band, Choir, ...) is a folder with one spreadsheet per
school year. The name of the file, up to the first space, is the year label:
`2022-2023.xlsx` and `2022-2023 (1).xlsx` both belong to `2022-2023`.

The spreadsheets are typically exported from a student information system and
then edited by hand. A typical file looks like this:

|              |              | ...     |
|--------------|--------------|---------|
| Course Title |              | Teacher |
| Band 7       |              | Gray    |
| Student ID   | Student Name | GR      |
| 4021056      | Doe, Jane    | 7       |
|              | 4021057      | Roe, John | 7 |

The engine does not require a fixed layout:
- the header row is the row with a cell that reads `Student ID` (any case). It may
  appear several times in the same file, each occurrence starts a new table.
- the name, grade and course columns are found from their labels (`Student Name`,
  `GR` or anything containing `grade`, `Course Title`). A missing name column is
  assumed to be right of the id column, a missing grade column right of the name.
- a row whose id cell is (nearly) empty while the next cell looks like an id is
  read one column to the right. This is the most common editing accident.
- the course of a row is read from its own column when there is one, otherwise
  from the closest `Course Title` label above (with the value just below the label).

## Output

For each program, the list of years and the list of students. Every student has
one entry per year of the program. Years without a record read
`{"grade": "N/A", "course": "No Enrollment"}`. A student listed in several
courses in the same year gets the courses joined with a comma.

## Configuration

`enrolldash` reads an optional JSON configuration file. All the keys are optional.

```json
{
  "rootDirectory": "Recruitment",
  "outputFile": "dashboard_data.json",
  "programs": ["Band", "Choir", "Dance", "Theatre"],
  "excludedDirectories": [".git", ".agent", "recruitment_dashboard"],
  "fileExtensions": ["xlsx"],
  "excelWorksheetName": null,
  "teacherBuckets": [
    {
      "school": "March Middle School",
      "buckets": [
        { "program": "Band", "teachers": ["Gray"] },
        { "program": "Choir", "teachers": ["Mosley"] },
        { "program": "Dance", "teachers": ["Delgado", "Pelagio"] }
      ]
    }
  ],
  "rules": {
    "headerScanRows": 20,
    "maxRejectedIdentityLength": 2,
    "shiftProbeMinLength": 5
  }
}
```

`teacherBuckets`: some schools file the spreadsheets of all programs in arbitrary
folders. For these schools, each file is assigned to the program of the first
bucket whose teacher name appears in the `Teacher` metadata of the file. The folder
of the file is only used when no teacher matches.

`rules`: the thresholds of the layout heuristics. Note that identifiers of
`maxRejectedIdentityLength` characters or fewer are always dropped.

 */
