use anyhow::Result;

fn main() -> Result<()> {
    control_map_cli::main_entry()
}
