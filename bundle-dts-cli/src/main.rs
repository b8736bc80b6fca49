use bundle_dts::bundle_declaration_file;
use bundle_dts::BundleOptions;
use bundle_dts::DtsBundler;
use bundle_dts::OsFs;
use clap::Parser;
use std::process;

mod config;

/// Bundles types/context-client.d.ts in place, inlining its relative imports.
#[derive(Parser)]
#[command(name = "bundle-dts", version, about = "Bundles the contextual-client declaration file in place")]
struct Cli {}

fn main() {
  let Cli {} = Cli::parse();
  let engine = DtsBundler::new(OsFs, BundleOptions::default());
  if let Err(err) = bundle_declaration_file(&engine, &OsFs, &config::context_client_path()) {
    eprintln!("error: {}", err);
    process::exit(1);
  }
}
