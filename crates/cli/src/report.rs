use legacy_rules_graph::Report;
use std::path::Path;

/// Human-readable summary of an inspection report
pub fn render_text_report(report: &Report) -> String {
    let mut md = String::new();
    md.push_str("# Legacy rules inspection\n\n");
    md.push_str(&format!("- Root: `{}`\n", report.root));
    md.push_str(&format!(
        "- base.includes: `{}`\n",
        report.base.includes.as_deref().unwrap_or("absent")
    ));
    md.push_str(&format!(
        "- base.load: `{}`\n",
        report.base.load.as_deref().unwrap_or("absent")
    ));
    md.push_str(&format!(
        "- base.rules: `{}`\n\n",
        report.base.rules.as_deref().unwrap_or("absent")
    ));

    md.push_str("## Counts\n\n");
    md.push_str("| rule files | includes | load calls | dispatch rules | edges | unreached |\n");
    md.push_str("|---:|---:|---:|---:|---:|---:|\n");
    md.push_str(&format!(
        "| `{}` | `{}` | `{}` | `{}` | `{}` | `{}` |\n\n",
        report.rule_files.len(),
        report.includes.len(),
        report.base_load_calls.len(),
        report.dispatch_rules.len(),
        report.traversal_graph.len(),
        report.unreached_rule_files.len()
    ));

    if !report.traversal_order.is_empty() {
        md.push_str("## Dispatch order\n\n");
        md.push_str("| # | condition | functions |\n");
        md.push_str("|---:|---|---|\n");
        for step in &report.traversal_order {
            md.push_str(&format!(
                "| `{}` | `{}` | {} |\n",
                step.index,
                escape_cell(&truncate_one_line(&step.condition, 80)),
                escape_cell(&step.functions.join(", "))
            ));
        }
        md.push('\n');
    }

    let missing = &report.missing;
    push_list(&mut md, "Includes without definitions", &missing.includes_without_definitions);
    push_list(&mut md, "Dispatch without definitions", &missing.dispatch_without_definitions);
    push_list(&mut md, "Load calls without definitions", &missing.load_without_definitions);
    push_list(&mut md, "Unresolved include paths", &missing.unresolved_include_paths);
    push_list(&mut md, "Unresolved lookup files", &missing.unresolved_lookup_files);
    push_list(&mut md, "Unreached rule files", &report.unreached_rule_files);

    let ambiguous: Vec<_> = report.ambiguous_matches().collect();
    if !ambiguous.is_empty() {
        md.push_str("## Ambiguous matches\n\n");
        for (name, files) in ambiguous {
            let names: Vec<String> = files.iter().map(|f| file_name(f)).collect();
            md.push_str(&format!("- `{name}` -> {}\n", names.join(", ")));
        }
        md.push('\n');
    }

    md
}

fn push_list(md: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("## {title} ({})\n\n", items.len()));
    for item in items {
        md.push_str(&format!("- `{item}`\n"));
    }
    md.push('\n');
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn truncate_one_line(text: &str, max_chars: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= max_chars {
        return line;
    }
    let mut out: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
