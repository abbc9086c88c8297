//! Contact form: arithmetic captcha, phone filtering and the submit state
//! machine. The network hop is behind [`Submitter`].

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::error::{FormError, SubmitError};

pub const SUBMIT_LABEL: &str = "Отправить";
pub const SUBMITTING_LABEL: &str = "Отправка...";
pub const CHALLENGE_ERROR: &str = "Ошибка в математическом примере.";
pub const SUCCESS_MESSAGE: &str = "Спасибо! Ваша заявка успешно отправлена.";
pub const TRANSPORT_ERROR: &str = "Не удалось отправить заявку. Попробуйте ещё раз.";
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(1500);

/// A wrong captcha answer is not a resting state: `begin_submit` reports it
/// as [`FormError::ChallengeMismatch`] and the form stays `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded,
}

/// Two single-digit operands; the answer is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    a: u8,
    b: u8,
}

impl Challenge {
    pub fn new(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            a: rng.gen_range(0..10),
            b: rng.gen_range(0..10),
        }
    }

    pub fn operands(&self) -> (u8, u8) {
        (self.a, self.b)
    }

    pub fn sum(&self) -> u32 {
        self.a as u32 + self.b as u32
    }

    pub fn prompt(&self) -> String {
        format!("Решите пример: {} + {} = ?", self.a, self.b)
    }

    /// Reads the leading integer the way a lenient form field does:
    /// `"7abc"` and `"7.9"` both answer 7. No leading digits never matches.
    pub fn check(&self, answer: &str) -> bool {
        leading_int(answer) == Some(self.sum() as i64)
    }
}

/// Optional sign and leading digits after whitespace; the rest is ignored.
fn leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overlong answers saturate instead of failing to parse.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Keep ASCII digits only.
pub fn filter_phone(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Field values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub captcha: String,
}

impl ContactForm {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What gets sent once the captcha passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl From<&ContactForm> for Submission {
    fn from(form: &ContactForm) -> Self {
        Self {
            name: form.name.clone(),
            phone: form.phone.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

/// Delivers a submission somewhere.
pub trait Submitter {
    fn send(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

/// Waits a fixed latency and reports success.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmitter {
    latency: Duration,
}

impl SimulatedSubmitter {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LATENCY)
    }
}

impl Submitter for SimulatedSubmitter {
    fn send(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send {
        let latency = self.latency;
        let payload = serde_json::to_string(submission).unwrap_or_default();
        async move {
            log::debug!("simulated submit ({} ms): {}", latency.as_millis(), payload);
            tokio::time::sleep(latency).await;
            Ok(())
        }
    }
}

pub struct FormController<R: Rng> {
    rng: R,
    challenge: Challenge,
    state: FormState,
    form: ContactForm,
    message: Option<FormMessage>,
    button: SubmitButton,
}

impl<R: Rng> FormController<R> {
    pub fn new(mut rng: R) -> Self {
        let challenge = Challenge::generate(&mut rng);
        Self {
            rng,
            challenge,
            state: FormState::Idle,
            form: ContactForm::default(),
            message: None,
            button: SubmitButton {
                label: SUBMIT_LABEL.to_string(),
                disabled: false,
            },
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn challenge(&self) -> Challenge {
        self.challenge
    }

    pub fn challenge_prompt(&self) -> String {
        self.challenge.prompt()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn set_name(&mut self, value: &str) {
        self.form.name = value.to_string();
    }

    /// Input handler: non-digits are dropped as they are typed.
    pub fn set_phone(&mut self, value: &str) {
        self.form.phone = filter_phone(value);
    }

    pub fn set_email(&mut self, value: &str) {
        self.form.email = value.to_string();
    }

    pub fn set_message(&mut self, value: &str) {
        self.form.message = value.to_string();
    }

    pub fn set_captcha(&mut self, value: &str) {
        self.form.captcha = value.to_string();
    }

    /// Validate the captcha and, if it matches, enter `Submitting`.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::Busy);
        }
        self.message = None;

        if !self.challenge.check(&self.form.captcha) {
            self.state = FormState::Idle;
            self.message = Some(FormMessage {
                kind: MessageKind::Error,
                text: CHALLENGE_ERROR.to_string(),
            });
            log::info!("contact form: captcha mismatch");
            return Err(FormError::ChallengeMismatch);
        }

        self.state = FormState::Submitting;
        self.button.disabled = true;
        self.button.label = SUBMITTING_LABEL.to_string();
        log::debug!("contact form: submitting");
        Ok(Submission::from(&self.form))
    }

    /// Apply the submitter's result.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> Result<(), FormError> {
        if self.state != FormState::Submitting {
            return Err(FormError::NotSubmitting);
        }
        self.button.disabled = false;
        self.button.label = SUBMIT_LABEL.to_string();

        match result {
            Ok(()) => {
                self.state = FormState::Succeeded;
                self.message = Some(FormMessage {
                    kind: MessageKind::Success,
                    text: SUCCESS_MESSAGE.to_string(),
                });
                self.form = ContactForm::default();
                self.challenge = Challenge::generate(&mut self.rng);
                log::info!("contact form: submitted, new challenge issued");
                Ok(())
            }
            Err(e) => {
                self.state = FormState::Idle;
                self.message = Some(FormMessage {
                    kind: MessageKind::Error,
                    text: TRANSPORT_ERROR.to_string(),
                });
                log::error!("contact form: {}", e);
                Err(e.into())
            }
        }
    }

    /// Text to show for a rejected `begin_submit`. A busy form keeps its
    /// previous message, so report the rejection itself.
    pub fn rejection_text(&self, error: &FormError) -> String {
        match (error, &self.message) {
            (FormError::Busy, _) | (_, None) => error.to_string(),
            (_, Some(message)) => message.text.clone(),
        }
    }

    /// Full round trip through `submitter`.
    pub async fn submit<S: Submitter>(&mut self, submitter: &S) -> Result<(), FormError> {
        let submission = self.begin_submit()?;
        let result = submitter.send(&submission).await;
        self.finish_submit(result)
    }
}
