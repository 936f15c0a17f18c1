fn main() -> anyhow::Result<()> {
    study_sync_cli::run()
}
