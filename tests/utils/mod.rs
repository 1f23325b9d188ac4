use std::fs;
use std::path::Path;

use tempfile::TempDir;
use turnout_etl::PipelineConfig;

pub const ELECTION_2016: &str = "\
,Voter Turnout,,
,Total Ballots Counted,Voting-Eligible Population (VEP),Voting-Age Population (VAP)
United States,\"136,669,276\",\"230,931,921\",\"250,055,734\"
Ohio,\"1,000,000\",\"2,000,000\",\"2,500,000\"
Iowa,\"1,500,000\",\"2,500,000\",\"3,000,000\"
";

pub const ELECTION_2018: &str = "\
,Voter Turnout,,
,Total Ballots Counted,Voting-Eligible Population (VEP),Voting-Age Population (VAP)
United States,\"118,532,437\",\"237,250,815\",\"253,768,092\"
Ohio,\"800,000\",\"2,000,000\",\"2,500,000\"
Iowa,\"1,000,000\",\"2,500,000\",\"3,000,000\"
";

/// Iowa has no 2018 value
pub const EDUCATION: &str = "\
Name,2016,2018
Ohio,28.0,29.0
Iowa,27.5,
";

pub const INCOME: &str = "\
Name,2016,2018
Units,Dollars,Dollars
Ohio,\"53,301\",\"56,111\"
Iowa,\"56,247\",\"59,955\"
";

pub const DIVERSITY: &str = "\
Location,2016__White,2018__White,Footnotes
United States,0.61,0.60,
Ohio,0.79,0.78,
Iowa,0.86,0.85,
Puerto Rico,0.70,0.70,
";

const AGE_BANDS: [&str; 6] = [
    "Children 0-18",
    "Adults 19-25",
    "Adults 26-34",
    "Adults 35-54",
    "Adults 55-64",
    "65+",
];

pub const POPULATION: &str = "\
Name,2016,2018
Ohio,\"11,600,000\",\"11,700,000\"
Iowa,\"3,130,000\",\"3,150,000\"
";

pub const AREA: &str = "\
State,LandAreaSQM
Ohio,\"40,000\"
Iowa,\"55,853\"
";

/// Age source with equal counts in every band, so each average is 241 / 6
#[must_use]
pub fn age_csv(years: &[i32]) -> String {
    let mut header = vec!["Location".to_string()];
    for year in years {
        header.extend(AGE_BANDS.iter().map(|band| format!("{year}__{band}")));
        header.push(format!("{year}__Total"));
    }

    let row = |name: &str, count: u32| {
        let mut cells = vec![name.to_string()];
        for _ in years {
            cells.extend(std::iter::repeat_n(count.to_string(), 6));
            cells.push((count * 6).to_string());
        }
        cells.join(",")
    };

    [
        "Population Distribution by Age".to_string(),
        "Timeframe: 2016 - 2018".to_string(),
        header.join(","),
        row("United States", 5000),
        row("Ohio", 100),
        row("Iowa", 50),
    ]
    .join("\n")
        + "\n"
}

/// Write a source file into the fixture directory
pub fn write_source(dir: &Path, file_name: &str, content: &str) {
    fs::write(dir.join(file_name), content).expect("failed to write fixture");
}

/// A data directory holding two states over one presidential and one midterm year
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path();
        write_source(path, "election_2016.csv", ELECTION_2016);
        write_source(path, "election_2018.csv", ELECTION_2018);
        write_source(path, "education.csv", EDUCATION);
        write_source(path, "income.csv", INCOME);
        write_source(path, "diversity.csv", DIVERSITY);
        write_source(path, "age.csv", &age_csv(&[2016, 2018]));
        write_source(path, "population.csv", POPULATION);
        write_source(path, "area.csv", AREA);
        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration reading from this fixture and writing to `output`
    #[must_use]
    pub fn config(&self, output: &Path) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.path().to_path_buf(),
            output_dir: output.to_path_buf(),
            election_years: vec![2016, 2018],
            expected_states: 2,
            ..Default::default()
        }
    }
}

/// Read an output CSV into its header and rows
pub fn read_output(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("failed to open output");
    let headers = reader
        .headers()
        .expect("missing header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("bad record").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}
