fn main() -> anyhow::Result<()> {
    pollster::block_on(snake3d::run())
}
