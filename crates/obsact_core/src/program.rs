//! Contexto de variáveis e execução de comandos.
//!
//! As variáveis vivem num [`Contexto`] criado na inicialização e passado
//! explicitamente para a execução. Não há estado global.

use crate::config::ProgramaConfig;
use crate::error::ObsActError;
use crate::notify::{self, Notifier};
use crate::types::{Comando, Condicao};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// Dispositivo e mensagem do programa de demonstração.
pub const DISPOSITIVO_DEMO: &str = "Termometro";
pub const MENSAGEM_DEMO: &str = "Temperatura esta em";

/// Tabela de variáveis inteiras do programa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contexto {
    variaveis: BTreeMap<String, i64>,
}

impl Contexto {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contexto do programa de demonstração: `temperatura = 0`.
    pub fn padrao() -> Self {
        let mut ctx = Self::new();
        ctx.set("temperatura", 0);
        ctx
    }

    /// Declara toda variável do programa com 0 e aplica os valores iniciais.
    pub fn from_programa(programa: &ProgramaConfig) -> Self {
        let mut ctx = Self::new();
        for nome in programa.variaveis_declaradas() {
            ctx.set(nome, 0);
        }
        for (nome, valor) in &programa.variaveis {
            ctx.set(nome, *valor);
        }
        ctx
    }

    pub fn get(&self, nome: &str) -> Result<i64, ObsActError> {
        self.variaveis
            .get(nome)
            .copied()
            .ok_or_else(|| ObsActError::VariavelIndefinida(nome.to_string()))
    }

    pub fn set(&mut self, nome: &str, valor: i64) {
        self.variaveis.insert(nome.to_string(), valor);
    }

    /// Avalia a condição com curto-circuito no E lógico.
    pub fn avaliar(&self, condicao: &Condicao) -> Result<bool, ObsActError> {
        let mut atual = Some(condicao);
        while let Some(c) = atual {
            let esquerda = self.get(&c.variavel)?;
            if !c.operador.compara(esquerda, c.valor.como_inteiro()) {
                return Ok(false);
            }
            atual = c.e.as_deref();
        }
        Ok(true)
    }
}

/// Executa um comando contra o contexto, escrevendo no notifier.
pub fn executar<W: Write>(
    comando: &Comando,
    ctx: &mut Contexto,
    notifier: &mut Notifier<W>,
) -> Result<(), ObsActError> {
    debug!("Executando {}", comando.nome());

    match comando {
        Comando::Atribuir { variavel, valor } => ctx.set(variavel, valor.como_inteiro()),
        Comando::Ligar { dispositivo } => notifier.ligar(dispositivo)?,
        Comando::Desligar { dispositivo } => notifier.desligar(dispositivo)?,
        Comando::Alerta {
            dispositivo,
            mensagem,
            variavel: None,
        } => notifier.alerta(dispositivo, mensagem)?,
        Comando::Alerta {
            dispositivo,
            mensagem,
            variavel: Some(var),
        } => {
            let valor = ctx.get(var)?;
            notifier.alerta_com_var(dispositivo, mensagem, valor)?;
        }
        Comando::Difundir {
            mensagem,
            variavel,
            dispositivos,
        } => {
            let valor = variavel.as_deref().map(|v| ctx.get(v)).transpose()?;
            notifier.difundir(dispositivos, mensagem, valor)?;
        }
        Comando::Quando {
            condicao,
            entao,
            senao,
        } => {
            let verdadeira = ctx.avaliar(condicao)?;
            debug!("quando {condicao} → {verdadeira}");
            if verdadeira {
                executar(entao, ctx, notifier)?;
            } else if let Some(senao) = senao {
                executar(senao, ctx, notifier)?;
            }
        }
    }
    Ok(())
}

/// Executa os comandos em ordem, parando no primeiro erro.
pub fn executar_programa<W: Write>(
    comandos: &[Comando],
    ctx: &mut Contexto,
    notifier: &mut Notifier<W>,
) -> Result<(), ObsActError> {
    for comando in comandos {
        executar(comando, ctx, notifier)?;
    }
    Ok(())
}

/// Rotina de entrada do programa de demonstração.
pub fn demonstracao<W: Write + ?Sized>(ctx: &Contexto, out: &mut W) -> Result<(), ObsActError> {
    let temperatura = ctx.get("temperatura")?;
    notify::alerta_com_var(out, DISPOSITIVO_DEMO, MENSAGEM_DEMO, temperatura)?;
    Ok(())
}

/// Executa um programa configurado e retorna quantas notificações emitiu.
pub fn run<W: Write>(programa: &ProgramaConfig, out: W) -> Result<usize, ObsActError> {
    let mut ctx = Contexto::from_programa(programa);
    let mut notifier = Notifier::new(out);
    executar_programa(&programa.comandos, &mut ctx, &mut notifier)?;
    notifier.flush()?;
    debug!("{} notificações emitidas", notifier.emitidas());
    Ok(notifier.emitidas())
}
