pub mod types;

pub use types::Verdict;

use colored::Colorize;

/// Print the report of interesting pull requests to stdout. Logging goes to
/// stderr, so this is the only thing the user sees on stdout.
pub fn print_report(verdicts: &[Verdict]) {
    println!();
    println!(
        "Found a total of {} interesting pull requests:",
        verdicts.len().to_string().green().bold()
    );
    println!();
    for verdict in verdicts {
        print!("{}", render_verdict(verdict));
    }
}

/// Format one verdict: identifier, diff URL, title, author, then every
/// catalog entry with a nonzero count. A verdict whose pull request could not
/// be matched back renders placeholders instead of failing.
fn render_verdict(verdict: &Verdict) -> String {
    let mut out = String::new();
    out.push_str(&format!("Pull Request ID: {}\n\n", verdict.id));
    out.push_str(&format!("\tDiff URL: {}\n", verdict.location));
    out.push_str(&format!(
        "\tTitle:   '{}'\n",
        verdict.title.as_deref().unwrap_or("<unknown>")
    ));
    out.push_str(&format!(
        "\tUser:    '{}'\n\n",
        verdict.author.as_deref().unwrap_or("<unknown>")
    ));

    out.push_str("\tReasons is interesting:\n");
    for (word, count) in &verdict.word_hits {
        if *count > 0 {
            out.push_str(&format!("\t'{}' occurs on {} line(s)\n", word, count));
        }
    }
    for (name, count) in &verdict.file_hits {
        if *count > 0 {
            out.push_str(&format!("\tthe file '{}' appears {} time(s)\n", name, count));
        }
    }
    out.push('\n');
    out
}
