//! Command implementations for the transcript processor CLI
//!
//! This module contains the main command execution logic, progress
//! reporting and report dispatch for the CLI interface.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indexmap::IndexMap;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::app::models::Student;
use crate::app::services::report;
use crate::app::services::statistics::{term_statistics, wam_trend};
use crate::app::services::term_codes;
use crate::app::services::transcript_parser::TranscriptParser;
use crate::cli::args::{Args, Commands, OutputFormat, ProcessArgs, TermsArgs, TrendArgs};
use crate::config::Config;
use crate::constants::{
    ALL_COLLEGES_LABEL, REPORT_FILENAME_PREFIX, TRANSCRIPT_FILE_EXTENSION, normalize_college,
};
use crate::{Error, Result};

/// Students per college, keyed by canonical college code
pub type CollegeData = IndexMap<String, IndexMap<String, Student>>;

/// Processing statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of transcript files processed
    pub files_processed: usize,
    /// Number of colleges found in the input
    pub colleges_processed: usize,
    /// Number of students parsed across all colleges
    pub students_parsed: usize,
    /// Number of terms reported on
    pub terms_reported: usize,
    /// Number of report files written
    pub reports_written: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl RunStats {
    /// Get summary of the run for final reporting
    pub fn summary(&self) -> String {
        format!(
            "Processed {} files -> {} colleges, {} students | \
             {} terms reported, {} report files written in {}",
            self.files_processed,
            self.colleges_processed,
            self.students_parsed,
            self.terms_reported,
            self.reports_written,
            HumanDuration(self.processing_time)
        )
    }
}

/// Main command runner for the transcript processor
pub fn run(args: Args) -> Result<RunStats> {
    match args.command {
        Some(Commands::Process(process_args)) => run_process(process_args),
        Some(Commands::Terms(terms_args)) => run_terms(terms_args),
        Some(Commands::Trend(trend_args)) => run_trend(trend_args),
        None => Ok(RunStats::default()),
    }
}

/// Run the process command: parse, compute statistics, write reports
fn run_process(args: ProcessArgs) -> Result<RunStats> {
    let start_time = Instant::now();
    setup_logging(args.get_log_level());

    info!("Starting transcript processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = Config::load(args.config_file.as_deref())?;
    debug!("Loaded configuration: {:?}", config);

    let input_dir = args
        .input_path
        .clone()
        .unwrap_or_else(|| config.input_dir.clone());
    let output_dir = args
        .output_path
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());

    let (mut college_data, all_terms, files_processed) =
        load_college_data(&input_dir, args.show_progress())?;

    // Optional college filter from configuration
    let filter = config.college_filter();
    if !filter.is_empty() {
        college_data.retain(|college, _| filter.contains(college));
    }

    let terms: Vec<String> = match &args.terms {
        Some(list) => list.terms.clone(),
        None => all_terms.iter().cloned().collect(),
    };
    if terms.is_empty() {
        warn!("No terms found in the input data, nothing to report");
    }

    if args.output_format != OutputFormat::Human {
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", output_dir.display()),
                e,
            )
        })?;
    }

    let mut reports_written = 0;
    for term in &terms {
        let term_code = report_file_code(term);

        match args.output_format {
            OutputFormat::Human => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                for (college, students) in &college_data {
                    let stats = term_statistics(students, term);
                    report::render_term_report(&mut out, college, students, term, &stats)?;
                }
            }
            OutputFormat::Csv => {
                for (college, students) in &college_data {
                    let path = output_dir.join(format!(
                        "{}_{}_{}.csv",
                        REPORT_FILENAME_PREFIX, term_code, college
                    ));
                    report::write_csv_file(&path, students, term)?;
                    info!("Wrote {}", path.display());
                    reports_written += 1;
                }

                // Combined sheet across all colleges
                let combined = combined_students(&college_data);
                let path = output_dir.join(format!(
                    "{}_{}_{}.csv",
                    REPORT_FILENAME_PREFIX, term_code, ALL_COLLEGES_LABEL
                ));
                report::write_csv_file(&path, &combined, term)?;
                info!("Wrote {}", path.display());
                reports_written += 1;
            }
            OutputFormat::Json => {
                let reports: Vec<_> = college_data
                    .iter()
                    .map(|(college, students)| {
                        report::college_report(college, term_statistics(students, term))
                    })
                    .collect();
                let json = report::to_json(&reports)?;
                let path =
                    output_dir.join(format!("{}_{}.json", REPORT_FILENAME_PREFIX, term_code));
                std::fs::write(&path, json).map_err(|e| {
                    Error::io(format!("Failed to write {}", path.display()), e)
                })?;
                info!("Wrote {}", path.display());
                reports_written += 1;
            }
        }
    }

    let stats = RunStats {
        files_processed,
        colleges_processed: college_data.len(),
        students_parsed: college_data.values().map(IndexMap::len).sum(),
        terms_reported: terms.len(),
        reports_written,
        processing_time: start_time.elapsed(),
    };

    info!("{}", stats.summary());
    if !args.quiet {
        println!("\n{}", stats.summary());
    }

    Ok(stats)
}

/// Run the terms command: list every term observed in the input
fn run_terms(args: TermsArgs) -> Result<RunStats> {
    let start_time = Instant::now();
    setup_logging(args.get_log_level());

    args.validate()?;
    let config = Config::load(args.config_file.as_deref())?;
    let input_dir = args
        .input_path
        .clone()
        .unwrap_or_else(|| config.input_dir.clone());

    let (college_data, all_terms, files_processed) = load_college_data(&input_dir, false)?;

    println!();
    for (i, term) in all_terms.iter().enumerate() {
        match term_codes::to_compact(term) {
            Some(code) => println!("{:>2}. {} ({})", i + 1, term, code),
            None => println!("{:>2}. {}", i + 1, term),
        }
    }

    Ok(RunStats {
        files_processed,
        colleges_processed: college_data.len(),
        students_parsed: college_data.values().map(IndexMap::len).sum(),
        terms_reported: all_terms.len(),
        reports_written: 0,
        processing_time: start_time.elapsed(),
    })
}

/// Run the trend command: per-college average WAM across all terms
fn run_trend(args: TrendArgs) -> Result<RunStats> {
    let start_time = Instant::now();
    setup_logging(args.get_log_level());

    args.validate()?;
    let config = Config::load(args.config_file.as_deref())?;
    let input_dir = args
        .input_path
        .clone()
        .unwrap_or_else(|| config.input_dir.clone());
    let output_dir = args
        .output_path
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());

    let (college_data, _all_terms, files_processed) = load_college_data(&input_dir, false)?;

    let mut reports_written = 0;
    match args.output_format {
        OutputFormat::Human => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for (college, students) in &college_data {
                writeln!(out, "\n{} WAM trend:", college)?;
                let trend = wam_trend(students);
                if trend.is_empty() {
                    writeln!(out, "  (no terms with a large enough cohort)")?;
                }
                for (term, wam) in trend {
                    writeln!(out, "  {:<24} {:.2}", term, wam)?;
                }
            }
        }
        OutputFormat::Csv => {
            std::fs::create_dir_all(&output_dir)?;
            let path = output_dir.join("College_Stats.csv");
            let file = std::fs::File::create(&path)?;
            let mut csv_writer = csv::Writer::from_writer(file);
            csv_writer.write_record(["College", "Term", "WAM"])?;
            for (college, students) in &college_data {
                for (term, wam) in wam_trend(students) {
                    csv_writer.write_record([college.as_str(), &term, &format!("{:.2}", wam)])?;
                }
            }
            csv_writer.flush()?;
            info!("Wrote {}", path.display());
            reports_written += 1;
        }
        OutputFormat::Json => {
            std::fs::create_dir_all(&output_dir)?;
            let trends: IndexMap<&String, _> = college_data
                .iter()
                .map(|(college, students)| (college, wam_trend(students)))
                .collect();
            let path = output_dir.join("College_Stats.json");
            std::fs::write(&path, serde_json::to_string_pretty(&trends)?)?;
            info!("Wrote {}", path.display());
            reports_written += 1;
        }
    }

    Ok(RunStats {
        files_processed,
        colleges_processed: college_data.len(),
        students_parsed: college_data.values().map(IndexMap::len).sum(),
        terms_reported: 0,
        reports_written,
        processing_time: start_time.elapsed(),
    })
}

/// Set up structured logging based on the CLI verbosity level
fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("transcript_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .ok();
}

/// Discover transcript text exports in the input directory
fn discover_transcripts(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(Error::file_not_found(input_dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TRANSCRIPT_FILE_EXTENSION))
        {
            files.push(path);
        }
    }

    debug!(
        "Discovered {} transcript files in {}",
        files.len(),
        input_dir.display()
    );
    Ok(files)
}

/// Derive the canonical college code from a transcript file name
///
/// The first whitespace-separated token of the file stem names the college,
/// e.g. "basser T3 2024.txt" -> "BASS".
fn college_label(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let label = stem.split_whitespace().next().unwrap_or(stem);
    normalize_college(label)
}

/// Parse every transcript file and compute WAMs for all students
fn load_college_data(
    input_dir: &Path,
    show_progress: bool,
) -> Result<(CollegeData, BTreeSet<String>, usize)> {
    let files = discover_transcripts(input_dir)?;
    if files.is_empty() {
        warn!(
            "No .{} transcript files found in {}",
            TRANSCRIPT_FILE_EXTENSION,
            input_dir.display()
        );
    }

    let progress_bar = if show_progress && !files.is_empty() {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut college_data: CollegeData = IndexMap::new();
    let mut all_terms = BTreeSet::new();

    for file in &files {
        let college = college_label(file);
        if let Some(pb) = &progress_bar {
            pb.set_message(format!("Parsing {}", college));
        }

        let parser = TranscriptParser::new(&college)?;
        let result = parser.parse_file(file, &mut all_terms)?;
        debug!("{}: {}", file.display(), result.summary());

        college_data
            .entry(college)
            .or_default()
            .extend(result.students);

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Parsing complete");
    }

    // Batch WAM pass once all parsing is done
    for students in college_data.values_mut() {
        for student in students.values_mut() {
            student.process_wams();
        }
    }

    Ok((college_data, all_terms, files.len()))
}

/// Merge every college's students into one collection
fn combined_students(college_data: &CollegeData) -> IndexMap<String, Student> {
    let mut combined = IndexMap::new();
    for students in college_data.values() {
        for (zid, student) in students {
            combined.insert(zid.clone(), student.clone());
        }
    }
    combined
}

/// File-name-safe code for a term key
fn report_file_code(term: &str) -> String {
    term_codes::to_compact(term).unwrap_or_else(|| term.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    #[test]
    fn test_college_label() {
        assert_eq!(college_label(Path::new("data/basser T3 2024.txt")), "BASS");
        assert_eq!(college_label(Path::new("goldstein.txt")), "GOLD");
        // Unknown labels pass through unchanged
        assert_eq!(college_label(Path::new("WARR 2024.txt")), "WARR");
    }

    #[test]
    fn test_report_file_code() {
        assert_eq!(report_file_code("2024 TERM 1"), "24T1");
        assert_eq!(report_file_code("UNKNOWN TERM"), "UNKNOWN_TERM");
    }

    #[test]
    fn test_discover_transcripts() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["baxter T1.txt", "basser T1.txt", "notes.md"] {
            let mut f = std::fs::File::create(temp_dir.path().join(name)).unwrap();
            writeln!(f, "placeholder").unwrap();
        }

        let files = discover_transcripts(temp_dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["basser T1.txt", "baxter T1.txt"]);
    }

    #[test]
    fn test_discover_transcripts_missing_dir() {
        assert!(discover_transcripts(Path::new("/nonexistent/dir")).is_err());
    }

    #[test]
    fn test_load_college_data() {
        let temp_dir = TempDir::new().unwrap();
        let mut f = std::fs::File::create(temp_dir.path().join("basser T1.txt")).unwrap();
        writeln!(f, "Jane A Doe (1234567)").unwrap();
        writeln!(f, "Term 1 2024").unwrap();
        writeln!(f, "COMP1511   Programming Fundamentals      85   High Distinction").unwrap();

        let (college_data, all_terms, files) = load_college_data(temp_dir.path(), false).unwrap();

        assert_eq!(files, 1);
        assert!(college_data.contains_key("BASS"));
        assert!(all_terms.contains("2024 TERM 1"));
        // WAMs are computed in the batch pass
        let jane = &college_data["BASS"]["1234567"];
        assert_eq!(jane.wams["2024 TERM 1"], Some(85.0));
        assert_eq!(jane.overall_wam, Some(85.0));
    }
}
