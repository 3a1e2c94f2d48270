/// UI language for the watcher's fixed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Spanish,
    English,
}

impl Language {
    /// Map a language code (`"en"`, `"en-US"`, `"es_CL"`) to a language.
    /// Anything unrecognized falls back to Spanish.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Language::English,
            _ => Language::Spanish,
        }
    }

    pub fn labels(self) -> Labels {
        match self {
            Language::Spanish => Labels {
                show_logs: "Mostrar logs".to_string(),
                hide_logs: "Ocultar logs".to_string(),
                pending: "Enviando tarea, esperando respuesta...".to_string(),
                started: "Proceso iniciado...".to_string(),
                success_title: "Proceso completado con éxito".to_string(),
                download_logs: "Descargar logs".to_string(),
            },
            Language::English => Labels {
                show_logs: "Show logs".to_string(),
                hide_logs: "Hide logs".to_string(),
                pending: "Sending task, pending response...".to_string(),
                started: "Process started...".to_string(),
                success_title: "Process completed successfully".to_string(),
                download_logs: "Download logs".to_string(),
            },
        }
    }
}

/// Fixed strings rendered by a watch session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub show_logs: String,
    pub hide_logs: String,
    /// Log placeholder while the job is queued.
    pub pending: String,
    /// Log placeholder once a worker picked the job up.
    pub started: String,
    pub success_title: String,
    pub download_logs: String,
}

impl Labels {
    /// Text for the log panel's disclosure toggle.
    pub fn disclosure(&self, expanded: bool) -> &str {
        if expanded {
            &self.hide_logs
        } else {
            &self.show_logs
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Language::default().labels()
    }
}
