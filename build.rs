use anyhow::Result;
use vergen::EmitBuilder;

// Git metadata for `flightstat --version`. Outside a git checkout vergen emits
// placeholder values instead of failing the build.
fn main() -> Result<()> {
    EmitBuilder::builder()
        .git_describe(true, true, None)
        .git_commit_date()
        .emit()?;
    Ok(())
}
