//! Modelo de um programa ObsAct: valores, condições e comandos.
//!
//! Tudo é (de)serializável via serde para que o programa possa ser
//! descrito em `obsact.toml`:
//!
//! ```toml
//! [[programa.comandos]]
//! acao = "quando"
//! condicao = { variavel = "temperatura", operador = ">", valor = 30 }
//! entao = { acao = "ligar", dispositivo = "Ventilador" }
//! senao = { acao = "desligar", dispositivo = "Ventilador" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────
// Valores
// ──────────────────────────────────────────────

/// Literal atribuído ou comparado. Booleanos valem 1/0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Valor {
    Bool(bool),
    Inteiro(i64),
}

impl Valor {
    pub fn como_inteiro(self) -> i64 {
        match self {
            Valor::Bool(b) => i64::from(b),
            Valor::Inteiro(n) => n,
        }
    }
}

impl From<i64> for Valor {
    fn from(n: i64) -> Self {
        Valor::Inteiro(n)
    }
}

impl From<bool> for Valor {
    fn from(b: bool) -> Self {
        Valor::Bool(b)
    }
}

// ──────────────────────────────────────────────
// Condições
// ──────────────────────────────────────────────

/// Operador relacional de uma observação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operador {
    #[serde(rename = ">")]
    Maior,
    #[serde(rename = "<")]
    Menor,
    #[serde(rename = ">=")]
    MaiorIgual,
    #[serde(rename = "<=")]
    MenorIgual,
    #[serde(rename = "==")]
    Igual,
    #[serde(rename = "!=")]
    Diferente,
}

impl Operador {
    pub fn compara(self, esquerda: i64, direita: i64) -> bool {
        match self {
            Operador::Maior => esquerda > direita,
            Operador::Menor => esquerda < direita,
            Operador::MaiorIgual => esquerda >= direita,
            Operador::MenorIgual => esquerda <= direita,
            Operador::Igual => esquerda == direita,
            Operador::Diferente => esquerda != direita,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Operador::Maior => ">",
            Operador::Menor => "<",
            Operador::MaiorIgual => ">=",
            Operador::MenorIgual => "<=",
            Operador::Igual => "==",
            Operador::Diferente => "!=",
        }
    }
}

impl fmt::Display for Operador {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `variavel operador valor`, opcionalmente encadeada com E lógico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condicao {
    pub variavel: String,
    pub operador: Operador,
    pub valor: Valor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<Box<Condicao>>,
}

impl Condicao {
    pub fn new(variavel: impl Into<String>, operador: Operador, valor: impl Into<Valor>) -> Self {
        Self {
            variavel: variavel.into(),
            operador,
            valor: valor.into(),
            e: None,
        }
    }

    /// Encadeia `outra` ao fim desta condição.
    pub fn e(mut self, outra: Condicao) -> Self {
        self.e = Some(Box::new(match self.e.take() {
            Some(prox) => (*prox).e(outra),
            None => outra,
        }));
        self
    }

    /// Variáveis lidas por esta condição e pelas encadeadas.
    pub fn variaveis(&self) -> Vec<&str> {
        let mut vars = vec![self.variavel.as_str()];
        let mut atual = self.e.as_deref();
        while let Some(c) = atual {
            vars.push(c.variavel.as_str());
            atual = c.e.as_deref();
        }
        vars
    }
}

impl fmt::Display for Valor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valor::Bool(b) => write!(f, "{b}"),
            Valor::Inteiro(n) => write!(f, "{n}"),
        }
    }
}

/// Renderiza a cadeia inteira: `a > 1 && b == true`.
impl fmt::Display for Condicao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variavel, self.operador, self.valor)?;
        if let Some(prox) = &self.e {
            write!(f, " && {prox}")?;
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Comandos
// ──────────────────────────────────────────────

/// Um comando do programa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "acao", rename_all = "snake_case")]
pub enum Comando {
    /// `def variavel = valor`
    Atribuir { variavel: String, valor: Valor },
    Ligar { dispositivo: String },
    Desligar { dispositivo: String },
    /// `alerta` ou, com `variavel`, `alerta_com_var`.
    Alerta {
        dispositivo: String,
        mensagem: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variavel: Option<String>,
    },
    /// Um alerta por dispositivo da lista.
    Difundir {
        mensagem: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variavel: Option<String>,
        dispositivos: Vec<String>,
    },
    Quando {
        condicao: Condicao,
        entao: Box<Comando>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        senao: Option<Box<Comando>>,
    },
}

impl Comando {
    /// Nome curto para logs.
    pub fn nome(&self) -> &'static str {
        match self {
            Comando::Atribuir { .. } => "atribuir",
            Comando::Ligar { .. } => "ligar",
            Comando::Desligar { .. } => "desligar",
            Comando::Alerta { variavel: None, .. } => "alerta",
            Comando::Alerta { variavel: Some(_), .. } => "alerta_com_var",
            Comando::Difundir { .. } => "difundir",
            Comando::Quando { .. } => "quando",
        }
    }
}
