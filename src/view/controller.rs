//! Per-form controller owning the form's inputs and the helpers that keep
//! derived values (total charges, slider readout) in sync.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::form::field::{FieldKind, FormField, FormId, NO, SATISFACTION_READOUT, YES};
use crate::form::{FieldValues, FormSnapshot, Parsed};
use crate::utils::{format_fixed2, format_number};

/// Input errors raised while editing a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown field `{field}` on the {form} form")]
    Unknown { form: FormId, field: String },
    #[error("{label} must be one of: {options}")]
    NotAnOption { label: &'static str, options: String },
    #[error("{label} is not a numeric field")]
    NotSteppable { label: &'static str },
}

/// Reaction wired to changes of specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// `target = rate * months * 12`, rounded to two decimals.
    DerivedTotal {
        rate: &'static str,
        months: &'static str,
        target: &'static str,
    },
    /// Mirrors a range input into a readout element.
    SliderReadout {
        slider: &'static str,
        readout: &'static str,
    },
}

impl Binding {
    fn watches(&self, field: &str) -> bool {
        match self {
            Binding::DerivedTotal { rate, months, .. } => field == *rate || field == *months,
            Binding::SliderReadout { slider, .. } => field == *slider,
        }
    }
}

/// Result of a stepper press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
    Changed(String),
    /// The stepped value would leave the declared bounds.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct FormController {
    form: FormId,
    values: FieldValues,
    readouts: BTreeMap<&'static str, String>,
    bindings: Vec<Binding>,
}

impl FormController {
    /// Builds the controller for a form with its standard bindings and runs
    /// the initial refresh, as the page did on load.
    pub fn new(form: FormId) -> Self {
        let mut controller = match form {
            FormId::Bank => Self::with_bindings(
                form,
                // A range input starts at the midpoint of its bounds.
                FieldValues::new().with("satisfactionScore", "3"),
                vec![Binding::SliderReadout {
                    slider: "satisfactionScore",
                    readout: SATISFACTION_READOUT,
                }],
            ),
            FormId::Telecom => Self::with_bindings(
                form,
                FieldValues::new(),
                vec![Binding::DerivedTotal {
                    rate: "monthlyCharges",
                    months: "accountLength",
                    target: "totalCharges",
                }],
            ),
        };
        controller.refresh_slider_label();
        controller.refresh_derived_total();
        controller
    }

    pub fn with_bindings(form: FormId, values: FieldValues, bindings: Vec<Binding>) -> Self {
        Self {
            form,
            values,
            readouts: BTreeMap::new(),
            bindings,
        }
    }

    pub fn form(&self) -> FormId {
        self.form
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn readout(&self, id: &str) -> Option<&str> {
        self.readouts.get(id).map(String::as_str)
    }

    pub fn readouts(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.readouts.iter().map(|(id, value)| (*id, value.as_str()))
    }

    pub fn field(&self, id: &str) -> Result<&'static FormField, FieldError> {
        self.form.field(id).ok_or_else(|| FieldError::Unknown {
            form: self.form,
            field: id.to_string(),
        })
    }

    /// Takes the per-submission copy of the current inputs.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::capture(self.form, &self.values)
    }

    /// Stores raw input for a field. Numeric text is kept verbatim so that
    /// invalid input reaches validation; choices are normalized to their
    /// canonical option. Empty input clears the field.
    pub fn set(&mut self, id: &str, raw: &str) -> Result<(), FieldError> {
        let field = self.field(id)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return self.clear(id);
        }
        let value = match field.kind {
            FieldKind::Integer | FieldKind::Decimal => trimmed.to_string(),
            FieldKind::Choice(options) => options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(trimmed))
                .map(|option| option.to_string())
                .ok_or_else(|| FieldError::NotAnOption {
                    label: field.label,
                    options: options.join(", "),
                })?,
            FieldKind::YesNo => match trimmed.to_ascii_lowercase().as_str() {
                "y" | "yes" => YES.to_string(),
                "n" | "no" => NO.to_string(),
                _ => {
                    return Err(FieldError::NotAnOption {
                        label: field.label,
                        options: format!("{YES}, {NO}"),
                    })
                }
            },
        };
        self.values.set(field.id, value);
        self.notify(field.id);
        Ok(())
    }

    pub fn clear(&mut self, id: &str) -> Result<(), FieldError> {
        let field = self.field(id)?;
        self.values.clear(field.id);
        self.notify(field.id);
        Ok(())
    }

    /// Steps a numeric field by `delta`. The new value is written only when it
    /// stays inside the declared bounds; missing bounds are unbounded. A blank
    /// or invalid current value counts as zero.
    pub fn adjust(&mut self, id: &str, delta: i64) -> Result<Adjustment, FieldError> {
        let field = self.field(id)?;
        let current = match field.kind {
            FieldKind::Integer => self.values.integer(id).value().unwrap_or(0) as f64,
            FieldKind::Decimal => self.values.decimal(id).value().unwrap_or(0.0),
            FieldKind::Choice(_) | FieldKind::YesNo => {
                return Err(FieldError::NotSteppable { label: field.label })
            }
        };
        let next = current + delta as f64;
        if !field.bounds.map_or(true, |bounds| bounds.contains(next)) {
            debug!(field = id, next, "step rejected by bounds");
            return Ok(Adjustment::Unchanged);
        }

        let text = match field.kind {
            FieldKind::Integer => format!("{}", next as i64),
            _ => format_number(next),
        };
        debug!(field = id, value = %text, "stepped");
        self.values.set(field.id, text.clone());
        self.notify(field.id);
        Ok(Adjustment::Changed(text))
    }

    /// Recomputes every derived total from its inputs. Blank inputs count as
    /// zero; an invalid input leaves the total untouched.
    pub fn refresh_derived_total(&mut self) {
        for binding in self.bindings.clone() {
            if let Binding::DerivedTotal {
                rate,
                months,
                target,
            } = binding
            {
                let rate = match self.values.decimal(rate) {
                    Parsed::Value(value) => value,
                    Parsed::Missing => 0.0,
                    Parsed::Invalid(_) => continue,
                };
                let months = match self.values.integer(months) {
                    Parsed::Value(value) => value as f64,
                    Parsed::Missing => 0.0,
                    Parsed::Invalid(_) => continue,
                };
                self.values.set(target, format_fixed2(rate * months * 12.0));
            }
        }
    }

    pub fn refresh_slider_label(&mut self) {
        for binding in self.bindings.clone() {
            if let Binding::SliderReadout { slider, readout } = binding {
                let value = self.values.raw(slider).unwrap_or_default().to_string();
                self.readouts.insert(readout, value);
            }
        }
    }

    fn notify(&mut self, id: &str) {
        let triggered: Vec<Binding> = self
            .bindings
            .iter()
            .copied()
            .filter(|binding| binding.watches(id))
            .collect();
        for binding in triggered {
            match binding {
                Binding::DerivedTotal { .. } => self.refresh_derived_total(),
                Binding::SliderReadout { .. } => self.refresh_slider_label(),
            }
        }
    }
}
