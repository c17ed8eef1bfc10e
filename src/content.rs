use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Everything the page shows, loaded once at startup and never mutated.
#[derive(Debug, Deserialize)]
pub struct SiteContent {
    pub site: Site,
    pub nav: Vec<NavLink>,
    pub hero: Hero,
    pub method: Method,
    pub about: About,
    pub services: Vec<Service>,
    pub testimonials: Vec<Testimonial>,
    pub contact: Contact,
    pub footer: Footer,
}

#[derive(Debug, Deserialize)]
pub struct Site {
    pub name: String,
    pub contact_email: String,
    /// Label on the header/menu pill that leads to the contact block.
    pub nav_cta_label: String,
}

#[derive(Debug, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Section key the link scrolls to: one of "method", "about",
    /// "services", "testimonials", "contact".
    pub section: String,
}

#[derive(Debug, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta_label: String,
    #[serde(default)]
    pub poster: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Method {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub quote: String,
    pub quote_author: String,
}

#[derive(Debug, Deserialize)]
pub struct About {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub link_label: String,
    #[serde(default)]
    pub portrait: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
    pub link_label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub text: String,
    pub author: String,
    pub role: String,
    /// Identifier the avatar lookup hashes; typically an email address.
    pub contact: String,
}

#[derive(Debug, Deserialize)]
pub struct Contact {
    pub heading: String,
    pub body: String,
    pub cta_label: String,
}

#[derive(Debug, Deserialize)]
pub struct Footer {
    pub copyright: String,
    pub legal: Vec<String>,
}

impl SiteContent {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read content file {}", path.display()))?;
        let content: SiteContent = toml::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        content.validate()?;
        Ok(content)
    }

    // The carousel requires at least one testimonial, and the card swap
    // tracks testimonials by id, so ids must be present and unique.
    fn validate(&self) -> Result<()> {
        if self.testimonials.is_empty() {
            bail!("at least one testimonial is required");
        }
        let mut seen = HashSet::new();
        for testimonial in &self.testimonials {
            if testimonial.id.trim().is_empty() {
                bail!("testimonial by '{}' has an empty id", testimonial.author);
            }
            if !seen.insert(testimonial.id.as_str()) {
                bail!("duplicate testimonial id '{}'", testimonial.id);
            }
        }
        Ok(())
    }

    pub fn testimonial_by_id(&self, id: &str) -> Option<&Testimonial> {
        self.testimonials.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(testimonials: &str) -> String {
        format!(
            r#"
            {testimonials}

            [site]
            name = "Gloria Ramirez"
            contact_email = "hola@example.com"
            nav_cta_label = "Iniciar Proceso"

            [[nav]]
            label = "El Método"
            section = "method"

            [hero]
            title = "Comprender las Raíces"
            subtitle = "Un espacio de terapia sistémica."
            cta_label = "Explorar Servicios"

            [method]
            heading = "El Eco del Sistema Familiar"
            paragraphs = ["Las Constelaciones Familiares ofrecen una mirada profunda."]
            quote = "Sólo cuando estamos en sintonía con nuestro destino."
            quote_author = "Bert Hellinger"

            [about]
            heading = "Mi Enfoque"
            paragraphs = ["Un espacio de escucha activa."]
            link_label = "Leer más"

            [[services]]
            title = "Sesión Individual"
            description = "Un proceso íntimo."
            link_label = "Saber Más"

            [contact]
            heading = "¿Deseas Iniciar tu Proceso?"
            body = "Te invito a contactarme."
            cta_label = "Enviar un Mensaje"

            [footer]
            copyright = "© 2025 Gloria Ramirez. Todos los derechos reservados."
            legal = ["Política de Privacidad"]
            "#
        )
    }

    #[test]
    fn parses_a_complete_file() {
        let raw = sample(
            r#"
            [[testimonials]]
            id = "t1"
            text = "Encontré una paz que no sabía que estaba buscando."
            author = "A. Martínez"
            role = "Cliente"
            contact = "amartinez.test@example.com"
            "#,
        );
        let content: SiteContent = toml::from_str(&raw).unwrap();
        content.validate().unwrap();
        assert_eq!(content.testimonials.len(), 1);
        assert_eq!(content.testimonial_by_id("t1").unwrap().author, "A. Martínez");
        assert!(content.testimonial_by_id("t9").is_none());
    }

    #[test]
    fn rejects_empty_testimonials() {
        let raw = sample("testimonials = []");
        let content: SiteContent = toml::from_str(&raw).unwrap();
        assert!(content.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = sample(
            r#"
            [[testimonials]]
            id = "t1"
            text = "a"
            author = "A"
            role = "r"
            contact = "a@example.com"

            [[testimonials]]
            id = "t1"
            text = "b"
            author = "B"
            role = "r"
            contact = "b@example.com"
            "#,
        );
        let content: SiteContent = toml::from_str(&raw).unwrap();
        assert!(content.validate().is_err());
    }

    #[test]
    fn rejects_blank_id() {
        let raw = sample(
            r#"
            [[testimonials]]
            id = "  "
            text = "a"
            author = "A"
            role = "r"
            contact = "a@example.com"
            "#,
        );
        let content: SiteContent = toml::from_str(&raw).unwrap();
        assert!(content.validate().is_err());
    }
}
