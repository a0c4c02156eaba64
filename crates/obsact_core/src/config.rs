//! Configuração do programa via TOML.
//!
//! Sem `obsact.toml` o runner executa o programa de demonstração:
//! um `Termometro` com sensor `temperatura = 0` e um único
//! `alerta_com_var`.

use crate::error::ObsActError;
use crate::types::Comando;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Nome do arquivo procurado ao lado do executável.
pub const CONFIG_FILE: &str = "obsact.toml";

/// Um dispositivo declarado, opcionalmente com a variável do seu sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispositivoConfig {
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<String>,
}

/// Dispositivos, variáveis iniciais e comandos de um programa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramaConfig {
    pub dispositivos: Vec<DispositivoConfig>,
    /// Valor inicial de cada variável
    pub variaveis: BTreeMap<String, i64>,
    pub comandos: Vec<Comando>,
}

impl Default for ProgramaConfig {
    fn default() -> Self {
        Self {
            dispositivos: vec![DispositivoConfig {
                nome: "Termometro".into(),
                sensor: Some("temperatura".into()),
            }],
            variaveis: BTreeMap::from([("temperatura".to_string(), 0)]),
            comandos: vec![Comando::Alerta {
                dispositivo: "Termometro".into(),
                mensagem: "Temperatura esta em".into(),
                variavel: Some("temperatura".into()),
            }],
        }
    }
}

impl ProgramaConfig {
    /// Todas as variáveis declaradas: iniciais, sensores e alvos de atribuição.
    pub fn variaveis_declaradas(&self) -> BTreeSet<&str> {
        let mut vars: BTreeSet<&str> = self.variaveis.keys().map(String::as_str).collect();
        vars.extend(self.dispositivos.iter().filter_map(|d| d.sensor.as_deref()));

        let mut pilha: Vec<&Comando> = self.comandos.iter().collect();
        while let Some(cmd) = pilha.pop() {
            match cmd {
                Comando::Atribuir { variavel, .. } => {
                    vars.insert(variavel.as_str());
                }
                Comando::Quando { entao, senao, .. } => {
                    pilha.push(&**entao);
                    pilha.extend(senao.as_deref());
                }
                _ => {}
            }
        }
        vars
    }
}

/// Configuração raiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub programa: ProgramaConfig,
}

impl AppConfig {
    /// Parseia configuração a partir de texto TOML.
    pub fn parse(content: &str) -> Result<Self, ObsActError> {
        toml::from_str(content).map_err(|e| ObsActError::Config(e.to_string()))
    }

    /// Carrega configuração de um arquivo TOML.
    ///
    /// Arquivo ausente ou inválido resulta na configuração padrão.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ObsActError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ObsActError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do obsact.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join(CONFIG_FILE)
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let programa = &self.programa;
        let vars = programa.variaveis_declaradas();
        let devices: BTreeSet<&str> = programa
            .dispositivos
            .iter()
            .map(|d| d.nome.as_str())
            .collect();

        let mut errors = Vec::new();
        for cmd in &programa.comandos {
            validate_comando(cmd, &vars, &devices, &mut errors);
        }
        errors
    }
}

fn validate_comando(
    cmd: &Comando,
    vars: &BTreeSet<&str>,
    devices: &BTreeSet<&str>,
    errors: &mut Vec<String>,
) {
    let check_device = |d: &str, errors: &mut Vec<String>| {
        if !devices.contains(d) {
            errors.push(format!("Dispositivo não declarado em {}: {d}", cmd.nome()));
        }
    };

    match cmd {
        Comando::Atribuir { .. } => {}
        Comando::Ligar { dispositivo } | Comando::Desligar { dispositivo } => {
            check_device(dispositivo.as_str(), errors);
        }
        Comando::Alerta {
            dispositivo,
            variavel,
            ..
        } => {
            check_device(dispositivo.as_str(), errors);
            check_var(variavel.as_deref(), cmd, vars, errors);
        }
        Comando::Difundir {
            variavel,
            dispositivos,
            ..
        } => {
            if dispositivos.is_empty() {
                errors.push("Difundir sem dispositivos".into());
            }
            for d in dispositivos {
                check_device(d.as_str(), errors);
            }
            check_var(variavel.as_deref(), cmd, vars, errors);
        }
        Comando::Quando {
            condicao,
            entao,
            senao,
        } => {
            for v in condicao.variaveis() {
                check_var(Some(v), cmd, vars, errors);
            }
            validate_comando(entao, vars, devices, errors);
            if let Some(senao) = senao {
                validate_comando(senao, vars, devices, errors);
            }
        }
    }
}

fn check_var(var: Option<&str>, cmd: &Comando, vars: &BTreeSet<&str>, errors: &mut Vec<String>) {
    if let Some(v) = var {
        if !vars.contains(v) {
            errors.push(format!("Variável não declarada em {}: {v}", cmd.nome()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condicao, Operador, Valor};

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::parse(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
[programa.variaveis]
temperatura = 25
"#;
        let config = AppConfig::parse(partial).unwrap();
        assert_eq!(config.programa.variaveis["temperatura"], 25);
        // Outros campos devem ter valor padrão
        assert_eq!(config.programa.comandos.len(), 1);
        assert_eq!(config.programa.dispositivos[0].nome, "Termometro");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = AppConfig::parse("[programa\n").unwrap_err();
        assert!(matches!(err, ObsActError::Config(_)));
    }

    #[test]
    fn load_missing_file_falls_back_to_default() {
        let config = AppConfig::load(Path::new("/nao/existe/obsact.toml"));
        assert_eq!(config, AppConfig::default());
    }

    fn temp_config_path(nome: &str) -> PathBuf {
        std::env::temp_dir().join(format!("obsact-{}-{nome}.toml", std::process::id()))
    }

    #[test]
    fn load_malformed_file_falls_back_to_default() {
        let path = temp_config_path("malformado");
        std::fs::write(&path, "[programa\n").unwrap();
        let config = AppConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_reads_program_from_file() {
        let path = temp_config_path("valido");
        std::fs::write(
            &path,
            r#"
[[programa.dispositivos]]
nome = "Lampada"

[[programa.comandos]]
acao = "ligar"
dispositivo = "Lampada"
"#,
        )
        .unwrap();
        let config = AppConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.programa.dispositivos.len(), 1);
        assert_eq!(config.programa.dispositivos[0].nome, "Lampada");
        assert_eq!(
            config.programa.comandos,
            vec![Comando::Ligar {
                dispositivo: "Lampada".into(),
            }]
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let path = temp_config_path("salvo");
        let mut config = AppConfig::default();
        config.programa.variaveis.insert("temperatura".into(), -4);
        config.programa.comandos.push(Comando::Quando {
            condicao: Condicao::new("temperatura", Operador::Menor, 0_i64),
            entao: Box::new(Comando::Alerta {
                dispositivo: "Termometro".into(),
                mensagem: "Abaixo de zero".into(),
                variavel: None,
            }),
            senao: None,
        });

        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn sensors_and_assignments_are_declared() {
        let programa = ProgramaConfig {
            dispositivos: vec![DispositivoConfig {
                nome: "Higrometro".into(),
                sensor: Some("umidade".into()),
            }],
            variaveis: BTreeMap::new(),
            comandos: vec![Comando::Quando {
                condicao: Condicao::new("umidade", Operador::Menor, 30_i64),
                entao: Box::new(Comando::Atribuir {
                    variavel: "seco".into(),
                    valor: Valor::Bool(true),
                }),
                senao: None,
            }],
        };
        let vars = programa.variaveis_declaradas();
        assert!(vars.contains("umidade"));
        assert!(vars.contains("seco"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn validate_reports_unknown_names() {
        let config = AppConfig {
            programa: ProgramaConfig {
                dispositivos: vec![DispositivoConfig {
                    nome: "Lampada".into(),
                    sensor: None,
                }],
                variaveis: BTreeMap::new(),
                comandos: vec![
                    Comando::Ligar {
                        dispositivo: "Ventilador".into(),
                    },
                    Comando::Alerta {
                        dispositivo: "Lampada".into(),
                        mensagem: "Nivel".into(),
                        variavel: Some("luz".into()),
                    },
                    Comando::Difundir {
                        mensagem: "Oi".into(),
                        variavel: None,
                        dispositivos: vec![],
                    },
                    Comando::Quando {
                        condicao: Condicao::new("presenca", Operador::Igual, true),
                        entao: Box::new(Comando::Ligar {
                            dispositivo: "Lampada".into(),
                        }),
                        senao: Some(Box::new(Comando::Desligar {
                            dispositivo: "Abajur".into(),
                        })),
                    },
                ],
            },
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 5, "Erros: {:?}", errors);
        assert!(errors[0].contains("Ventilador"));
        assert!(errors[1].contains("luz"));
        assert!(errors[2].contains("Difundir"));
        // Condição e ramo `senao` aninhados também são verificados
        assert!(errors[3].contains("presenca"));
        assert!(errors[4].contains("Abajur"));
    }
}
