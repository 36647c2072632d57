fn main() -> Result<(), Box<dyn std::error::Error>> {
  vergen::EmitBuilder::builder().all_build().all_git().all_cargo().emit()?;
  Ok(())
}
