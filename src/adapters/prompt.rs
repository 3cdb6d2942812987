//! Interactive console prompt and label normalization.
//!
//! Free-text risk and horizon answers are matched to the canonical labels
//! here, before anything reaches the selector.

use std::io::{self, BufRead, Write};

use crate::domain::profile::{Horizon, UserProfile};
use crate::domain::risk::RiskProfile;

/// Similarity (0-100) a free-text answer must exceed to count as a label.
pub const MATCH_THRESHOLD: u32 = 80;

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0; b.len() + 1];
    let mut curr = vec![0; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Indel similarity on a 0-100 scale, rounded: `2 * LCS / (len_a + len_b)`.
pub fn similarity(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    (200.0 * lcs_len(&a, &b) as f64 / total as f64).round() as u32
}

/// Closest candidate to `input` if it is similar enough.
pub fn best_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input = input.trim().to_lowercase();
    candidates
        .iter()
        .map(|c| (*c, similarity(&input, c)))
        .fold(None, |best: Option<(&str, u32)>, (c, score)| match best {
            Some((_, s)) if s >= score => best,
            _ => Some((c, score)),
        })
        .filter(|(_, score)| *score > MATCH_THRESHOLD)
        .map(|(c, _)| c)
}

pub fn match_risk_profile(input: &str) -> Option<RiskProfile> {
    let labels: Vec<&str> = RiskProfile::ALL.iter().map(|r| r.label()).collect();
    best_match(input, &labels).map(RiskProfile::from_label)
}

pub fn match_horizon(input: &str) -> Option<Horizon> {
    let labels: Vec<&str> = Horizon::ALL.iter().map(|h| h.label()).collect();
    best_match(input, &labels).map(Horizon::from_label)
}

pub const WELCOME: &str = "\
Welcome to your personal investment allocation assistant!

Answer a few questions about the amount you want to invest, your risk
tolerance, your investment horizon and your desired return, and you will get
a selection of financial products suited to your profile, along with an
estimate of the portfolio's average volatility and return. The number of
products grows with the amount invested. Estimates use historical daily
prices. Nothing you enter is stored.
";

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn welcome(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", WELCOME)
    }

    /// `None` once input is exhausted.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_positive(&mut self, question: &str, what: &str) -> io::Result<Option<f64>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => return Ok(Some(v)),
                Ok(_) => writeln!(self.output, "Please enter a positive {}.", what)?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn ask_label<T>(
        &mut self,
        question: &str,
        invalid: &str,
        matcher: fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match matcher(&answer) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.output, "{}", invalid)?,
            }
        }
    }

    /// Ask for a full profile, re-asking each question until it is valid.
    pub fn read_profile(&mut self) -> io::Result<Option<UserProfile>> {
        writeln!(self.output, "--- Investment Profile ---")?;

        let Some(amount) = self.ask_positive("Amount to invest (€): ", "amount")? else {
            return Ok(None);
        };
        let Some(risk_profile) = self.ask_label(
            "Risk profile (Conservative, Balanced, Aggressive): ",
            "Invalid risk profile. Please choose from Conservative, Balanced or Aggressive.",
            match_risk_profile,
        )?
        else {
            return Ok(None);
        };
        let Some(horizon) = self.ask_label(
            "Horizon (Short, Medium, Long): ",
            "Invalid horizon. Please choose from Short, Medium or Long.",
            match_horizon,
        )?
        else {
            return Ok(None);
        };
        let Some(desired_return) = self.ask_positive("Desired return (% per year): ", "return")?
        else {
            return Ok(None);
        };

        Ok(Some(UserProfile::new(
            amount,
            risk_profile,
            horizon,
            desired_return,
        )))
    }

    pub fn ask_again(&mut self) -> io::Result<bool> {
        let answer = self.ask("Do you want to perform another simulation? (Yes/No): ")?;
        Ok(matches!(answer, Some(a) if a.eq_ignore_ascii_case("yes")))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }
}
