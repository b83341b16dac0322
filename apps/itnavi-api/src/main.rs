use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = itnavi_api::Args::parse();

	itnavi_api::run(args).await
}
