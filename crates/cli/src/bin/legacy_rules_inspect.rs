use anyhow::Result;

fn main() -> Result<()> {
    legacy_rules_cli::main_entry()
}
