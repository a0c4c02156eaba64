//! # ObsAct Core
//!
//! Runtime dos programas ObsAct: funções de notificação de dispositivos,
//! modelo de comandos, contexto de variáveis e configuração TOML.
//!
//! ## Módulos
//! - [`notify`] – `ligar`, `desligar`, `alerta`, `alerta_com_var` e [`Notifier`]
//! - [`types`] – Comandos, condições e valores de um programa
//! - [`program`] – Contexto de variáveis e execução de comandos
//! - [`config`] – Configuração do programa via TOML
//! - [`error`] – Erros do runtime

pub mod config;
pub mod error;
pub mod notify;
pub mod program;
pub mod types;

// Re-exports convenientes
pub use config::{AppConfig, ProgramaConfig};
pub use error::ObsActError;
pub use notify::Notifier;
pub use program::{Contexto, demonstracao, run};
