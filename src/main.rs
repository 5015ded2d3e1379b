use rod_logic::{
  building_block::util::{format_bits, parse_bits},
  computer::live_layer::DisplayMode,
  BlockMatrix,
  Computer,
  RunnerConfig,
  SequenceRunner,
  Stack,
};
use std::error::Error;
use tracing::info;

// out = E ? W : D
fn data_register() -> Result<Stack, Box<dyn Error>> {
  Ok(Stack::parse(&[vec!["IPD", "PDP"], vec!["II"], vec!["I"]])?)
}

fn describe(computer: &Computer) -> String {
  computer.layers()
    .iter()
    .map(|layer| {
      let mode = match layer.display() {
        DisplayMode::Blocks => 'B',
        DisplayMode::Gates => 'G',
      };
      format!(
        "{}{}@{:.2}/{:.2}",
        mode,
        format_bits(layer.values()),
        layer.pct(),
        layer.flyout(),
      )
    })
    .collect::<Vec<_>>()
    .join(" ")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
  tracing_subscriber::fmt::init();

  let table = data_register()?.truth_table(&["E", "D", "W"])?;
  println!("{}", table);
  println!("digest: {}", table.digest()?);

  let computer = Computer::new(4, vec![
    BlockMatrix::parse(&["1100", "1000", "0001", "1011"])?,
  ])?;
  let inputs = parse_bits("0100")?;
  let expected = computer.stack().evaluate(&inputs)?;

  let config = RunnerConfig::from_env()?;
  let step = computer.sequence(inputs)?;
  let renderer = |computer: &Computer| {
    info!(layers = %describe(computer), "frame");
  };
  let runner = SequenceRunner::new(step, computer, renderer, config)?;

  while let Some(current) = runner.current_step() {
    info!(path = ?current.path, "{}", current.description);
    if runner.step().await? {
      break;
    }
  }

  let outputs = runner.inspect(|c| c.outputs().to_vec()).await;
  println!("outputs: {} (expected {})", format_bits(&outputs), format_bits(&expected));
  Ok(())
}
