// Copyright 2025 Folio Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use folio::build;
use folio::config::{AuthConfig, ServeArgs};
use folio::run;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio and blog server with an admin content API", long_about = None)]
#[command(version = build::PKG_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Verify that the admin credentials and signing secret are present
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => run(args.into_config()).await?,
        Commands::CheckConfig => {
            let missing = AuthConfig::from_env().missing();
            if !missing.is_empty() {
                return Err(format!(
                    "missing required configuration: {}",
                    missing.join(", ")
                )
                .into());
            }
            println!("admin authentication configuration is complete");
        }
    }

    Ok(())
}
