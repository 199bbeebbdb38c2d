//! Line-by-line registration and sign-in prompts

use chrono::NaiveDate;
use colored::Colorize;
use dpc_application::CityDirectory;
use dpc_domain::{
    BRAZILIAN_STATES, CityMatch, FieldError, Gender, LoginForm, RegistrationForm, match_city,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Parse a birth date typed as `DD/MM/AAAA`
pub fn parse_birth_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y").ok()
}

/// Mask a phone number as `(XX) XXXXX-XXXX`
///
/// Non-digits are dropped and at most eleven digits are kept; shorter input
/// is masked as far as it goes.
pub fn format_whatsapp(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(11)
        .collect();

    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Accept `s`/`sim`/`y`/`yes` as consent
pub fn parse_yes(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

const MAX_CITY_SUGGESTIONS: usize = 10;

/// Lines listing ambiguous city candidates, truncated with a remainder count
pub fn city_suggestions(candidates: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = candidates
        .iter()
        .take(MAX_CITY_SUGGESTIONS)
        .map(|c| format!("    {}", c))
        .collect();
    if candidates.len() > MAX_CITY_SUGGESTIONS {
        lines.push(format!(
            "    ... e mais {}",
            candidates.len() - MAX_CITY_SUGGESTIONS
        ));
    }
    lines
}

/// Asks for the registration or sign-in fields on the terminal
pub struct RegistrationPrompt {
    editor: DefaultEditor,
}

impl RegistrationPrompt {
    pub fn new() -> RlResult<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Fill a form, pre-populating each field from `previous`
    ///
    /// The city is checked against the municipalities `cities` returns for the
    /// chosen state; when that list is empty any name is accepted.
    /// Returns `None` when the user aborts with Ctrl-C or Ctrl-D.
    pub async fn ask(
        &mut self,
        previous: &RegistrationForm,
        cities: &dyn CityDirectory,
    ) -> RlResult<Option<RegistrationForm>> {
        println!();
        println!("{}", "Cadastro".cyan().bold());
        println!("{}", "-".repeat(40));

        let mut form = RegistrationForm::default();

        let Some(value) = self.field("Nome", &previous.first_name)? else {
            return Ok(None);
        };
        form.first_name = value;

        let Some(value) = self.field("Sobrenome", &previous.last_name)? else {
            return Ok(None);
        };
        form.last_name = value;

        let previous_date = previous
            .birth_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default();
        let Some(value) = self.field("Data de nascimento (DD/MM/AAAA)", &previous_date)? else {
            return Ok(None);
        };
        form.birth_date = parse_birth_date(&value);
        if form.birth_date.is_none() && !value.trim().is_empty() {
            println!("{}", "  Data não reconhecida, campo ignorado.".yellow());
        }

        let previous_gender = previous.gender.map(|g| g.as_str()).unwrap_or_default();
        let Some(value) = self.field("Sexo (m/f/o, opcional)", previous_gender)? else {
            return Ok(None);
        };
        form.gender = value.parse::<Gender>().ok();

        let Some(value) = self.field("Estado (UF)", &previous.state)? else {
            return Ok(None);
        };
        form.state = value.trim().to_uppercase();

        let known = if BRAZILIAN_STATES.contains(&form.state.as_str()) {
            let known = cities.cities(&form.state).await;
            if known.is_empty() {
                println!(
                    "{}",
                    "  Lista de cidades indisponível, digite o nome da cidade.".yellow()
                );
            }
            known
        } else {
            Vec::new()
        };
        let Some(value) = self.city_field(&previous.city, &form.state, &known)? else {
            return Ok(None);
        };
        form.city = value;

        let Some(value) = self.field("Congregação", &previous.congregation)? else {
            return Ok(None);
        };
        form.congregation = value;

        let Some(value) = self.field("E-mail", &previous.email)? else {
            return Ok(None);
        };
        form.email = value.trim().to_string();

        let Some(value) = self.field("WhatsApp", &previous.whatsapp)? else {
            return Ok(None);
        };
        form.whatsapp = format_whatsapp(&value);

        let Some(value) = self.field("Aceita os termos de uso? (s/n)", "")? else {
            return Ok(None);
        };
        form.accepted_terms = parse_yes(&value);

        Ok(Some(form))
    }

    /// Ask for the e-mail and WhatsApp number of an existing account
    pub fn ask_login(&mut self, previous: &LoginForm) -> RlResult<Option<LoginForm>> {
        println!();
        println!("{}", "Login".cyan().bold());
        println!("{}", "-".repeat(40));

        let Some(email) = self.field("E-mail", &previous.email)? else {
            return Ok(None);
        };
        let Some(whatsapp) = self.field("WhatsApp", &previous.whatsapp)? else {
            return Ok(None);
        };
        Ok(Some(LoginForm::new(email, format_whatsapp(&whatsapp))))
    }

    /// Print validation errors under a heading
    pub fn show_errors(errors: &[FieldError]) {
        println!();
        println!("{}", "Corrija os campos abaixo:".red().bold());
        for error in errors {
            println!("  {} {}", "-".red(), error);
        }
    }

    /// Re-ask until the city is in `cities`, or the user keeps an unlisted name
    fn city_field(
        &mut self,
        initial: &str,
        state: &str,
        cities: &[String],
    ) -> RlResult<Option<String>> {
        let mut initial = initial.to_string();
        loop {
            let Some(value) = self.field("Cidade", &initial)? else {
                return Ok(None);
            };
            match match_city(&value, cities) {
                CityMatch::Matched(city) | CityMatch::Unchecked(city) => return Ok(Some(city)),
                CityMatch::Ambiguous(candidates) => {
                    println!("{}", "  Várias cidades correspondem:".yellow());
                    for line in city_suggestions(&candidates) {
                        println!("{}", line);
                    }
                }
                CityMatch::Unknown => {
                    let question = format!(
                        "  \"{}\" não consta na lista de {}. Manter mesmo assim? (s/n)",
                        value, state
                    );
                    let Some(answer) = self.field(&question, "")? else {
                        return Ok(None);
                    };
                    if parse_yes(&answer) {
                        return Ok(Some(value));
                    }
                }
            }
            initial = value;
        }
    }

    fn field(&mut self, label: &str, initial: &str) -> RlResult<Option<String>> {
        let prompt = format!("{}: ", label);
        match self.editor.readline_with_initial(&prompt, (initial, "")) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Cadastro cancelado.");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
