//! `verify-setup` — read-only setup diagnostics.
//!
//! Takes no arguments; inspects the generated config artifact, the HTML
//! entry points, and the `.env` file under the current working directory,
//! then prints a transcript, a summary block, and next-step suggestions.
//! Findings are advisory only — this tool always exits 0.

use supablog::{
    error::AppError,
    logger,
    paths::SitePaths,
    verify::{self, ArtifactReport, EnvFileReport, HtmlCheck},
};

fn main() {
    if let Err(e) = run() {
        // Even an internal error is advisory here; exit normally.
        eprintln!("⚠️  {e}");
    }
}

fn run() -> Result<(), AppError> {
    logger::init("warn")?;

    let root = std::env::current_dir()?;
    let paths = SitePaths::new(&root);

    println!("🔍 Checking setup...\n");

    let artifact = verify::check_artifact(&paths);
    print_artifact_transcript(&artifact);

    println!("\n📄 Checking HTML files...");
    let html = verify::check_html(&paths);
    print_html_transcript(&html);

    println!("\n🔐 Checking .env file...");
    let env_file = verify::check_env_file(&paths);
    print_env_file_transcript(&env_file);

    print_summary(&artifact, &html);
    print_next_steps(&artifact, &html);

    Ok(())
}

fn print_artifact_transcript(report: &ArtifactReport) {
    if !report.exists {
        println!("❌ sdk/config.js NOT found");
        println!("   run: build-config");
        return;
    }
    println!("✅ sdk/config.js found");

    if report.has_marker {
        println!("✅ SUPABASE_CONFIG object present");
    } else {
        println!("❌ SUPABASE_CONFIG object not found");
        return;
    }

    if !report.has_keys {
        println!("❌ credentials not found in the file");
        return;
    }
    println!("✅ credentials present in the file");

    if let (Some(url), Some(key)) = (&report.url, &report.anon_key) {
        println!("\n📋 Extracted configuration:");
        println!("   url: {}...", truncate(url, 30));
        println!("   key: {}...", truncate(key, 20));

        match report.url_looks_supabase() {
            Some(true) => println!("✅ URL looks like a Supabase project"),
            Some(false) => println!("⚠️  URL does not look like a Supabase project"),
            None => {}
        }
        match report.key_length_ok() {
            Some(true) => println!("✅ key length looks valid"),
            Some(false) => println!("⚠️  key looks too short"),
            None => {}
        }
    }
}

fn print_html_transcript(checks: &[HtmlCheck]) {
    for check in checks {
        match check.problem() {
            None => println!("✅ {}: scripts in the correct order", check.file),
            Some(problem) => println!("❌ {problem}"),
        }
    }
    if checks.is_empty() {
        println!("ℹ️  no HTML entry points found");
    }
}

fn print_env_file_transcript(report: &EnvFileReport) {
    if !report.exists {
        println!("ℹ️  no .env file (optional in development)");
        return;
    }
    println!("✅ .env file found");
    if report.complete() {
        println!("✅ credential variables present in .env");
    } else {
        println!("⚠️  credential variables may be incomplete in .env");
    }
}

fn print_summary(artifact: &ArtifactReport, html: &[HtmlCheck]) {
    let issues: Vec<String> = html.iter().filter_map(HtmlCheck::problem).collect();

    println!("\n{}", "=".repeat(50));
    println!("📊 VERIFICATION SUMMARY");
    println!("{}", "=".repeat(50));

    if artifact.basic_ok() {
        println!("✅ Basic configuration: OK");
    } else {
        println!("❌ Basic configuration: FAILED");
        println!("   run: build-config");
    }

    if issues.is_empty() {
        println!("✅ HTML files: OK");
    } else {
        println!("❌ HTML files: ISSUES FOUND");
        for issue in &issues {
            println!("   - {issue}");
        }
    }
}

fn print_next_steps(artifact: &ArtifactReport, html: &[HtmlCheck]) {
    let html_ok = html.iter().all(|c| c.problem().is_none());

    println!("\n💡 Next steps:");
    if !artifact.basic_ok() {
        println!("   1. Create a .env file with your credentials");
        println!("   2. Run: build-config");
    }
    if !html_ok {
        println!("   1. Fix the script order in the flagged HTML files");
    }
    if artifact.basic_ok() && html_ok {
        println!("   ✅ All set! You can test the site now.");
    }
    println!();
}

/// First `max` characters of `s` (character-safe, keys can be long JWTs).
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
