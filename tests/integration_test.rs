use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const IDEA_JSON: &str = r#"{
  "id": "idea-1",
  "title": "Factuur Robot",
  "oneLiner": "Automatische facturatie voor kappers",
  "targetAudience": "Kapsalons",
  "emoji": "💈",
  "complexity": "Laag",
  "potentialRevenue": "Hoog",
  "blueprint": {
    "painPoint": "Handmatig factureren kost **uren** per week[1].",
    "automation": "1. Webhook ontvangt afspraak\n2. PDF wordt gemaakt",
    "abstraction": "Eén knop in de kassa.",
    "polish": "Huisstijl per salon.",
    "monetization": "Abonnement",
    "whyNow": "E-facturatie wordt verplicht.",
    "mvpFeatures": ["**Snelle** export", "Herinneringen"],
    "techStack": ["Stripe", "Airtable"],
    "n8nNodes": ["Webhook", "HTTP Request"],
    "marketingChannels": ["LinkedIn"],
    "pricingStrategy": "€29 p/m",
    "difficultyRating": 35,
    "speedToLaunch": "1 week"
  }
}"#;

const ANALYSIS: &str = "Hier is de analyse.\n\n1. **Kernactiviteit:** Kapsalon keten[2]\n2. **Doelgroep:** Stedelijke klanten\n3. **Taken:** Afspraken en facturen";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saas-architect.toml");

    cargo::cargo_bin_cmd!("saas-architect")
        .args(["config", "init", "--path", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    assert!(config_path.exists());
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[provider]"));
}

#[test]
fn test_config_init_does_not_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_file(temp_dir.path(), "saas-architect.toml", "output_dir = \"mine\"\n");

    cargo::cargo_bin_cmd!("saas-architect")
        .args(["config", "init", "--path", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(&config_path).unwrap(),
        "output_dir = \"mine\"\n"
    );
}

#[test]
fn test_config_show_defaults() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output_dir = \"./blueprints\""))
        .stdout(predicate::str::contains("model_id = \"gemini-2.0-flash\""));
}

#[test]
fn test_config_show_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_file(temp_dir.path(), "broken.toml", "output_dir = [");

    cargo::cargo_bin_cmd!("saas-architect")
        .args(["config", "show", "--config", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: TOML parsing error"));
}

#[test]
fn test_normalize_from_stdin() {
    cargo::cargo_bin_cmd!("saas-architect")
        .arg("normalize")
        .write_stdin("**Koffie[1]  en thee")
        .assert()
        .success()
        .stdout("Koffie en thee\n");
}

#[test]
fn test_normalize_missing_file() {
    cargo::cargo_bin_cmd!("saas-architect")
        .args(["normalize", "/nonexistent/input.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Input error"));
}

#[test]
fn test_analyze_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(temp_dir.path(), "analyse.txt", ANALYSIS);

    let output = cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["analyze", input.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sections: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sections["activity"], "Kapsalon keten[2]");
    assert_eq!(sections["audience"], "Stedelijke klanten");
    assert_eq!(sections["tasks"], "Afspraken en facturen");
}

#[test]
fn test_analyze_shows_sections() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .env("NO_COLOR", "1")
        .arg("analyze")
        .write_stdin(ANALYSIS)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Kernactiviteit"))
        .stdout(predicate::str::contains("Kapsalon keten\n"))
        .stdout(predicate::str::contains("## Kansen & Taken"));
}

#[test]
fn test_analyze_falls_back_to_full_text() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .env("NO_COLOR", "1")
        .arg("analyze")
        .write_stdin("Dit bedrijf bakt brood[1] in Utrecht.")
        .assert()
        .success()
        .stderr(predicate::str::contains("Geen secties herkend"))
        .stdout(predicate::str::contains("Dit bedrijf bakt brood in Utrecht."));
}

#[test]
fn test_render_light_block() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["render", "--variant", "light"])
        .write_stdin("Tekst met **vet**.\n\n- een\n- twee")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<strong style=\"font-weight:bold;color:#0f172a\">vet</strong>",
        ))
        .stdout(predicate::str::contains("<ul "))
        .stdout(predicate::str::contains("class=").not());
}

#[test]
fn test_render_dark_inline() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["render", "--inline"])
        .write_stdin("- *schuin*")
        .assert()
        .success()
        .stdout(predicate::str::contains("<em class=\"italic text-slate-200\">schuin</em>"))
        .stdout(predicate::str::contains("<li").not());
}

#[test]
fn test_render_empty_input_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .arg("render")
        .write_stdin("[1][2]   ")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_render_drops_unsafe_link_target() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["render", "--variant", "light"])
        .write_stdin("Zie [klik](javascript:alert(1)) en [n8n](https://n8n.io)")
        .assert()
        .success()
        .stdout(predicate::str::contains("javascript").not())
        .stdout(predicate::str::contains("Zie klik en "))
        .stdout(predicate::str::contains("href=\"https://n8n.io\""));
}

#[test]
fn test_render_table() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["render", "--variant", "light"])
        .write_stdin("| Plan | Prijs |\n|---|---|\n| Pro | ~~€49~~ €29 |")
        .assert()
        .success()
        .stdout(predicate::str::contains("<table "))
        .stdout(predicate::str::contains(">Plan</th>"))
        .stdout(predicate::str::contains("<del "));
}

#[test]
fn test_render_unknown_variant() {
    cargo::cargo_bin_cmd!("saas-architect")
        .args(["render", "--variant", "sepia"])
        .write_stdin("tekst")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown render variant"));
}

#[test]
fn test_export_word_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let ideas = write_file(temp_dir.path(), "idea.json", IDEA_JSON);

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["export", ideas.to_str().unwrap(), "--format", "word", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xmlns:w='urn:schemas-microsoft-com:office:word'"))
        .stdout(predicate::str::contains("<h2>1. Het SaaS Concept</h2>"))
        .stdout(predicate::str::contains("Bedrijfsanalyse").not())
        .stdout(predicate::str::contains("<strong>uren</strong>"))
        .stdout(predicate::str::contains("[1]").not());

    assert!(!temp_dir.path().join("blueprints").exists());
}

#[test]
fn test_export_with_analysis_shifts_numbering() {
    let temp_dir = TempDir::new().unwrap();
    let ideas = write_file(temp_dir.path(), "idea.json", IDEA_JSON);
    let analysis = write_file(temp_dir.path(), "analyse.txt", ANALYSIS);

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args([
            "export",
            ideas.to_str().unwrap(),
            "--analysis",
            analysis.to_str().unwrap(),
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(">1. Bedrijfsanalyse</h2>"))
        .stdout(predicate::str::contains(">2. Het SaaS Concept</h2>"))
        .stdout(predicate::str::contains(">4. User Experience</h2>"))
        .stdout(predicate::str::contains("Kapsalon keten"));
}

#[test]
fn test_export_writes_to_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let ideas = write_file(temp_dir.path(), "idea.json", IDEA_JSON);

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["export", ideas.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blueprint written to"));

    let written = temp_dir
        .path()
        .join("blueprints")
        .join("Blueprint-Factuur-Robot.html");
    assert!(written.exists());
    let content = fs::read_to_string(written).unwrap();
    assert!(content.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_export_uses_configured_format() {
    let temp_dir = TempDir::new().unwrap();
    let ideas = write_file(temp_dir.path(), "idea.json", IDEA_JSON);
    let out_dir = temp_dir.path().join("docs");
    fs::create_dir(&out_dir).unwrap();
    let config_path = write_file(
        temp_dir.path(),
        "saas-architect.toml",
        "[export]\nformat = \"word\"\n",
    );

    cargo::cargo_bin_cmd!("saas-architect")
        .args([
            "export",
            ideas.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
            "--output",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(out_dir.join("Blueprint-Factuur-Robot.doc").exists());
}

#[test]
fn test_export_requires_selection_for_many_ideas() {
    let temp_dir = TempDir::new().unwrap();
    let second = IDEA_JSON.replace("idea-1", "idea-2");
    let payload = format!("[{}, {}]", IDEA_JSON, second);
    let ideas = write_file(temp_dir.path(), "ideas.json", &payload);

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["export", ideas.to_str().unwrap(), "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--select"));

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args([
            "export",
            ideas.to_str().unwrap(),
            "--select",
            "idea-2",
            "--dry-run",
        ])
        .assert()
        .success();
}

#[test]
fn test_export_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let ideas = write_file(temp_dir.path(), "ideas.json", "{ not json");

    cargo::cargo_bin_cmd!("saas-architect")
        .current_dir(temp_dir.path())
        .args(["export", ideas.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: JSON error"));
}
