use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ChunkOrigin {
  Initial,
  Async,
}

impl From<ChunkOrigin> for prodpack::ChunkOrigin {
  fn from(value: ChunkOrigin) -> Self {
    match value {
      ChunkOrigin::Initial => prodpack::ChunkOrigin::Initial,
      ChunkOrigin::Async => prodpack::ChunkOrigin::Async,
    }
  }
}
