// src/common/i18n.rs

// Tabela de mensagens: (código, português, inglês)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("validation_error", "Um ou mais campos são inválidos.", "One or more fields are invalid."),
    ("malformed_body", "Corpo da requisição inválido.", "Malformed request body."),
    ("invalid_query_param", "Parâmetro de consulta inválido.", "Invalid query parameter."),
    ("invalid_uuid", "Identificador inválido (não é um UUID).", "Invalid identifier (not a UUID)."),
    ("invalid_token", "Token de autenticação inválido ou ausente.", "Invalid or missing authentication token."),
    ("supplier_not_found", "Fornecedor não encontrado.", "Supplier not found."),
    ("invalid_page", "Página inválida.", "Invalid page."),
    ("internal_error", "Ocorreu um erro inesperado.", "An unexpected error occurred."),
    ("invalid_email", "Informe um e-mail válido.", "Enter a valid email address."),
    ("too_long", "Valor maior que o permitido.", "Value is too long."),
];

const SUPPORTED: &[&str] = &["pt", "en"];

/// Traduz códigos de erro para o idioma do cliente.
#[derive(Debug, Clone)]
pub struct I18nStore {
    default_lang: String,
}

impl I18nStore {
    pub fn new(default_lang: &str) -> Self {
        let default_lang = if SUPPORTED.contains(&default_lang) {
            default_lang.to_string()
        } else {
            tracing::warn!("Idioma padrão '{}' não suportado, usando 'pt'", default_lang);
            "pt".to_string()
        };
        Self { default_lang }
    }

    /// Códigos desconhecidos são devolvidos como estão.
    pub fn translate(&self, lang: &str, code: &str) -> String {
        let lang = if SUPPORTED.contains(&lang) {
            lang
        } else {
            self.default_lang.as_str()
        };

        MESSAGES
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, pt, en)| if lang == "en" { *en } else { *pt })
            .unwrap_or(code)
            .to_string()
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new("pt")
    }
}
