//! Localized launch announcement emails.
//!
//! Every [`Language`] owns exactly one [`Template`]. Lookups by code never fail:
//! unknown or missing codes resolve to the registry's default language.

use crate::domain::Language;

/// Subject line plus an HTML renderer taking the download link.
pub struct Template {
    pub subject: &'static str,
    render: fn(&str) -> String,
}

impl Template {
    /// Renders the full HTML document. Pure: same link, same output.
    pub fn render(&self, download_url: &str) -> String {
        (self.render)(download_url)
    }
}

impl Language {
    pub fn template(self) -> &'static Template {
        match self {
            Language::Es => &SPANISH,
            Language::En => &ENGLISH,
            Language::Pt => &PORTUGUESE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateRegistry {
    default: Language,
}

impl TemplateRegistry {
    pub fn new(default: Language) -> Self {
        Self { default }
    }

    pub fn language_for(&self, code: Option<&str>) -> Language {
        code.and_then(Language::from_code).unwrap_or(self.default)
    }

    pub fn resolve(&self, code: Option<&str>) -> &'static Template {
        self.language_for(code).template()
    }
}

static SPANISH: Template = Template {
    subject: "¡DuoMind ya está disponible en Play Store! 💙",
    render: render_spanish,
};

static ENGLISH: Template = Template {
    subject: "Your DuoMind app is ready",
    render: render_english,
};

static PORTUGUESE: Template = Template {
    subject: "Seu aplicativo DuoMind está pronto",
    render: render_portuguese,
};

fn layout(paragraphs: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0; padding: 20px;">
{paragraphs}
  <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
  <p style="font-size: 12px; color: #999;">{footer}</p>
</body>
</html>
"#
    )
}

fn link(download_url: &str) -> String {
    format!(r#"<a href="{download_url}" style="color: #667eea; text-decoration: none;">{download_url}</a>"#)
}

fn render_spanish(download_url: &str) -> String {
    let paragraphs = format!(
        r#"  <p>Hola,</p>
  <p>¡Buenas noticias! DuoMind ya está disponible oficialmente en Google Play y puedes descargarla desde este momento.</p>
  <p>Gracias por haberte registrado para recibir este aviso. Tu apoyo significó mucho durante el proceso, y hoy por fin puedo compartirte el lanzamiento.</p>
  <p>👉 <strong>Descargar DuoMind en Play Store:</strong><br>
  {}</p>
  <p>Espero que disfrutes la experiencia.</p>
  <p>Saludos,<br>El equipo de DuoMind</p>"#,
        link(download_url)
    );
    layout(
        &paragraphs,
        "Recibiste este email porque te registraste en duomindbelsa.vercel.app para ser notificado cuando DuoMind estuviera disponible.",
    )
}

fn render_english(download_url: &str) -> String {
    let paragraphs = format!(
        r#"  <p>Hello,</p>
  <p>We're writing to let you know that <strong>DuoMind is now available on Google Play Store</strong>.</p>
  <p>Since you signed up to be notified when the app was ready, here's the download link:</p>
  <p>{}</p>
  <p>DuoMind allows you to chat with multiple AI models simultaneously and compare their responses.</p>
  <p>Thank you for your interest,<br>The DuoMind Team</p>"#,
        link(download_url)
    );
    layout(
        &paragraphs,
        "You received this email because you signed up at duomindbelsa.vercel.app to be notified when DuoMind was available.",
    )
}

fn render_portuguese(download_url: &str) -> String {
    let paragraphs = format!(
        r#"  <p>Olá,</p>
  <p>Estamos escrevendo para informá-lo de que <strong>DuoMind já está disponível na Google Play Store</strong>.</p>
  <p>Como você se cadastrou para ser notificado quando o aplicativo estivesse pronto, aqui está o link de download:</p>
  <p>{}</p>
  <p>DuoMind permite que você converse com vários modelos de IA simultaneamente e compare suas respostas.</p>
  <p>Obrigado pelo seu interesse,<br>A equipe DuoMind</p>"#,
        link(download_url)
    );
    layout(
        &paragraphs,
        "Você recebeu este e-mail porque se inscreveu em duomindbelsa.vercel.app para ser notificado quando o DuoMind estivesse disponível.",
    )
}
