fn main() -> anyhow::Result<()> {
    typemine_cli::run()
}
