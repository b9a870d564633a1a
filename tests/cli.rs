mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::contains;
    use serde_json::Value;

    use std::fs;
    use std::path::Path;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "xray";

    fn xray_in(dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir).env("NO_COLOR", "1");
        Ok(cmd)
    }

    fn read_log(path: &Path) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    #[test]
    fn test_output__when_no_subcommand_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().failure();
        Ok(())
    }

    #[test]
    fn test_run__writes_four_steps() -> TestResult {
        let dir = tempfile::tempdir()?;

        xray_in(dir.path())?
            .args(["--no-config", "--no-progress", "run", "--seed", "1"])
            .assert()
            .success()
            .stdout(contains("Pipeline executed. Logs saved to xray_log.json"));

        let steps = read_log(&dir.path().join("xray_log.json"))?;
        let names: Vec<&str> = steps.iter().filter_map(|s| s["step"].as_str()).collect();
        assert_eq!(
            names,
            [
                "📝 keyword_generation",
                "🔍 candidate_search",
                "🤖 relevance_evaluation",
                "🏆 apply_filters_and_rank",
            ]
        );
        assert_eq!(steps[3]["evaluations"].as_array().map(Vec::len), Some(30));
        Ok(())
    }

    #[test]
    fn test_run__custom_log_file_and_candidate_count() -> TestResult {
        let dir = tempfile::tempdir()?;

        xray_in(dir.path())?
            .args([
                "--no-config",
                "--quiet",
                "run",
                "--candidates",
                "7",
                "--log-file",
                "trace.json",
            ])
            .assert()
            .success()
            .stdout("");

        let steps = read_log(&dir.path().join("trace.json"))?;
        assert_eq!(steps[1]["output"]["candidates_fetched"], 7);
        Ok(())
    }

    #[test]
    fn test_run__rejects_zero_candidates() -> TestResult {
        let dir = tempfile::tempdir()?;

        xray_in(dir.path())?
            .args(["--no-config", "run", "--candidates", "0"])
            .assert()
            .failure()
            .stderr(contains("Candidate count cannot be 0"));
        Ok(())
    }

    #[test]
    fn test_run__reads_config_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("custom.toml"),
            "candidate_count = 4\nseed = 3\nlog_file = \"from_config.json\"\n",
        )?;

        xray_in(dir.path())?
            .args(["--config", "custom.toml", "--quiet", "run"])
            .assert()
            .success();

        let steps = read_log(&dir.path().join("from_config.json"))?;
        assert_eq!(steps[1]["output"]["candidates_fetched"], 4);
        Ok(())
    }

    #[test]
    fn test_run__picks_up_dot_config_in_working_dir() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(".xray.toml"), "candidate_count = 2\n")?;

        xray_in(dir.path())?.args(["--quiet", "run"]).assert().success();

        let steps = read_log(&dir.path().join("xray_log.json"))?;
        assert_eq!(steps[1]["output"]["candidates_fetched"], 2);
        Ok(())
    }

    #[test]
    fn test_run__invalid_config_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("bad.toml"), "candidate_count = [")?;

        xray_in(dir.path())?
            .args(["--config", "bad.toml", "run"])
            .assert()
            .failure()
            .stderr(contains("Could not load configuration"))
            .stderr(contains("Invalid TOML"));
        Ok(())
    }

    #[test]
    fn test_run__warns_about_malformed_dot_config() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(".xray.toml"), "candidate_count = [")?;

        xray_in(dir.path())?
            .args(["--no-progress", "run"])
            .assert()
            .success()
            .stderr(contains("Ignoring config file"));

        let steps = read_log(&dir.path().join("xray_log.json"))?;
        assert_eq!(steps[1]["output"]["candidates_fetched"], 30);
        Ok(())
    }

    #[test]
    fn test_run__rejects_nan_price_band() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("nan.toml"), "price_band_low = nan\n")?;

        xray_in(dir.path())?
            .args(["--config", "nan.toml", "run"])
            .assert()
            .failure()
            .stderr(contains("must be finite"));

        assert!(!dir.path().join("xray_log.json").exists());
        Ok(())
    }

    #[test]
    fn test_dashboard__after_run() -> TestResult {
        let dir = tempfile::tempdir()?;

        xray_in(dir.path())?
            .args(["--no-config", "--quiet", "run", "--seed", "42"])
            .assert()
            .success();

        xray_in(dir.path())?
            .args(["--no-config", "dashboard"])
            .assert()
            .success()
            .stdout(contains("X-Ray Decision Dashboard"))
            .stdout(contains("Total Candidates: 30"))
            .stdout(contains("🏆 apply_filters_and_rank"))
            .stdout(contains("HTML dashboard generated: xray_dashboard.html"));

        let html = fs::read_to_string(dir.path().join("xray_dashboard.html"))?;
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("candidate-filter"));
        Ok(())
    }

    #[test]
    fn test_dashboard__no_html_and_filter() -> TestResult {
        let dir = tempfile::tempdir()?;

        xray_in(dir.path())?
            .args(["--no-config", "--quiet", "run", "--seed", "5"])
            .assert()
            .success();

        xray_in(dir.path())?
            .args(["--no-config", "dashboard", "--no-html", "--filter", "failed"])
            .assert()
            .success()
            .stdout(contains("showing Failed"));

        assert!(!dir.path().join("xray_dashboard.html").exists());
        Ok(())
    }

    #[test]
    fn test_dashboard__custom_output_path() -> TestResult {
        let dir = tempfile::tempdir()?;

        xray_in(dir.path())?
            .args(["--no-config", "--quiet", "run"])
            .assert()
            .success();

        xray_in(dir.path())?
            .args(["--no-config", "--quiet", "dashboard", "-o", "report.html"])
            .assert()
            .success();

        assert!(dir.path().join("report.html").exists());
        Ok(())
    }

    #[test]
    fn test_dashboard__when_no_candidate_qualifies() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(".xray.toml"), "min_reviews = 1000000\n")?;

        xray_in(dir.path())?.args(["--quiet", "run"]).assert().success();

        let steps = read_log(&dir.path().join("xray_log.json"))?;
        assert!(steps[3]["output"]["selection"].is_null());
        assert_eq!(steps[3]["output"]["passed"], 0);

        xray_in(dir.path())?
            .args(["dashboard", "--no-html"])
            .assert()
            .success()
            .stdout(contains("Top Candidate:    N/A"));
        Ok(())
    }

    #[test]
    fn test_dashboard__when_log_missing() -> TestResult {
        let dir = tempfile::tempdir()?;

        xray_in(dir.path())?
            .args(["--no-config", "dashboard"])
            .assert()
            .failure()
            .stderr(contains("Error: File not found: xray_log.json"));
        Ok(())
    }

    #[test]
    fn test_dashboard__when_log_malformed() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("xray_log.json"), "[{\"step\": ")?;

        xray_in(dir.path())?
            .args(["--no-config", "dashboard"])
            .assert()
            .failure()
            .stderr(contains("JSON error"));
        Ok(())
    }

    #[test]
    fn test_completions__bash() -> TestResult {
        Command::cargo_bin(NAME)?
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(contains("xray"));
        Ok(())
    }
}
