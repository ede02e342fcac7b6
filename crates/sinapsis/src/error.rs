use thiserror::Error;

/// Ways a scheduling round trip can fail
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("falta la API key: configura GOOGLE_API_KEY")]
    MissingCredential,

    /// Network failure; the request URL is stripped before it is stored
    #[error("no se pudo contactar con el modelo: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success status from the generation endpoint, quota errors included
    #[error("el modelo respondió con estado {status}: {body}")]
    Api { status: u16, body: String },

    #[error("el modelo no devolvió texto")]
    EmptyReply,

    /// Success status whose body is not a `generateContent` response
    #[error("respuesta ilegible del modelo: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("la IA respondió en un formato extraño: {raw:?}")]
    UnparseableReply { raw: String },
}

impl From<reqwest::Error> for ScheduleError {
    fn from(e: reqwest::Error) -> Self {
        ScheduleError::Transport(e.without_url())
    }
}

impl ScheduleError {
    /// Short message shown on the page
    pub fn user_message(&self) -> String {
        match self {
            ScheduleError::MissingCredential => "Falta la API Key en Secrets".to_string(),
            ScheduleError::UnparseableReply { .. } => {
                "La IA respondió en un formato extraño. Intenta de nuevo.".to_string()
            }
            other => format!("Se agotó el tiempo o hubo un error: {other}"),
        }
    }

    /// Parse failures are warnings; everything else is an error
    pub fn is_warning(&self) -> bool {
        matches!(self, ScheduleError::UnparseableReply { .. })
    }
}
