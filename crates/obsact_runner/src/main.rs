//! # ObsAct Runner
//!
//! Executa um programa ObsAct e escreve as notificações dos dispositivos
//! na saída padrão. Logs vão para stderr.
//!
//! ## Uso
//! ```bash
//! obsact                     # Programa descrito em obsact.toml, ou a demonstração
//! RUST_LOG=debug obsact      # Mostra cada comando executado
//! ```
//!
//! Sai com status 0 após executar o programa. Um `obsact.toml` que não
//! passa na validação, ou uma falha de escrita na saída, sai com status 1.

use obsact_core::config::AppConfig;
use std::io;
use std::process::ExitCode;
use tracing::{debug, error};

fn main() -> ExitCode {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        return ExitCode::FAILURE;
    }

    // ── Execução ──
    let stdout = io::stdout();
    match obsact_core::run(&config.programa, stdout.lock()) {
        Ok(emitidas) => {
            debug!("Programa concluído ({emitidas} notificações)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
