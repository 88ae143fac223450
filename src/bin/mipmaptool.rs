fn main() -> anyhow::Result<()> {
    mipmaptool::cli::run_cli()
}
