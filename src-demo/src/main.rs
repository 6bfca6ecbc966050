fn main() -> anyhow::Result<()> {
    slidepanel_demo::run()
}
