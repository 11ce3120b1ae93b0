//! dockyard CLI entry point

fn main() -> anyhow::Result<()> {
    dockyard::run()
}
