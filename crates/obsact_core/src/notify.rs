//! Notificações de dispositivos.
//!
//! Cada função escreve linhas de texto no sink recebido. Formatos:
//!
//! ```text
//! ligar           → "{id} ligado!\n"
//! desligar        → "{id} desligado!\n"
//! alerta          → "{id} recebeu o alerta:\n{msg}\n"
//! alerta_com_var  → "{id} recebeu o alerta:\n{msg} {valor}\n"
//! ```

use std::io::{self, Write};

/// Escreve a confirmação de dispositivo ligado.
pub fn ligar<W: Write + ?Sized>(out: &mut W, id: &str) -> io::Result<()> {
    writeln!(out, "{id} ligado!")
}

/// Escreve a confirmação de dispositivo desligado.
pub fn desligar<W: Write + ?Sized>(out: &mut W, id: &str) -> io::Result<()> {
    writeln!(out, "{id} desligado!")
}

/// Escreve um alerta de duas linhas: cabeçalho e mensagem.
pub fn alerta<W: Write + ?Sized>(out: &mut W, id: &str, msg: &str) -> io::Result<()> {
    writeln!(out, "{id} recebeu o alerta:")?;
    writeln!(out, "{msg}")
}

/// Escreve um alerta cuja segunda linha traz `valor` em base 10 após a mensagem.
pub fn alerta_com_var<W: Write + ?Sized>(
    out: &mut W,
    id: &str,
    msg: &str,
    valor: i64,
) -> io::Result<()> {
    writeln!(out, "{id} recebeu o alerta:")?;
    writeln!(out, "{msg} {valor}")
}

// ──────────────────────────────────────────────
// Notifier
// ──────────────────────────────────────────────

/// Dono de um sink de saída que conta as notificações emitidas.
pub struct Notifier<W: Write> {
    out: W,
    emitidas: usize,
}

impl<W: Write> Notifier<W> {
    pub fn new(out: W) -> Self {
        Self { out, emitidas: 0 }
    }

    pub fn ligar(&mut self, id: &str) -> io::Result<()> {
        ligar(&mut self.out, id)?;
        self.emitidas += 1;
        Ok(())
    }

    pub fn desligar(&mut self, id: &str) -> io::Result<()> {
        desligar(&mut self.out, id)?;
        self.emitidas += 1;
        Ok(())
    }

    pub fn alerta(&mut self, id: &str, msg: &str) -> io::Result<()> {
        alerta(&mut self.out, id, msg)?;
        self.emitidas += 1;
        Ok(())
    }

    pub fn alerta_com_var(&mut self, id: &str, msg: &str, valor: i64) -> io::Result<()> {
        alerta_com_var(&mut self.out, id, msg, valor)?;
        self.emitidas += 1;
        Ok(())
    }

    /// Difunde a mensagem para cada dispositivo, na ordem dada.
    ///
    /// Com `valor`, cada dispositivo recebe `alerta_com_var`; sem, `alerta`.
    pub fn difundir<S: AsRef<str>>(
        &mut self,
        dispositivos: &[S],
        msg: &str,
        valor: Option<i64>,
    ) -> io::Result<()> {
        for id in dispositivos {
            match valor {
                Some(v) => self.alerta_com_var(id.as_ref(), msg, v)?,
                None => self.alerta(id.as_ref(), msg)?,
            }
        }
        Ok(())
    }

    /// Número de notificações escritas com sucesso.
    pub fn emitidas(&self) -> usize {
        self.emitidas
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
