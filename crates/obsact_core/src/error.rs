//! Erros do runtime ObsAct.

/// Erros de execução e configuração.
#[derive(Debug, thiserror::Error)]
pub enum ObsActError {
    #[error("Erro de escrita na saída: {0}")]
    Io(#[from] std::io::Error),

    #[error("Variável não declarada: {0}")]
    VariavelIndefinida(String),

    #[error("Erro de configuração: {0}")]
    Config(String),
}
