fn main() -> anyhow::Result<()> {
    sandwichtimer::run()
}
