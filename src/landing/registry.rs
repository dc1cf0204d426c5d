use log::debug;

use crate::ports::ElementLookup;

pub mod ids {
    pub const OPEN_FORM_BTN: &str = "openFormBtn";
    pub const FORM_MODAL: &str = "formModal";
    pub const CLOSE_FORM_MODAL: &str = "closeFormModal";
    pub const LEAD_FORM: &str = "leadForm";
    pub const SUBMIT_BTN: &str = "submitBtn";
    pub const SUCCESS_MODAL: &str = "successModal";
    pub const TELEGRAM_BTN: &str = "telegramBtn";
    pub const HOURS: &str = "hours";
    pub const MINUTES: &str = "minutes";
    pub const SECONDS: &str = "seconds";
    pub const USER_NAME: &str = "userName";
    pub const USER_PHONE: &str = "userPhone";
}

/// Every named element the landing behaviour touches, looked up once at
/// startup. Anything missing stays `None` and the feature that needs it
/// quietly does nothing.
#[derive(Clone)]
pub struct ElementRegistry<E> {
    pub open_form_btn: Option<E>,
    pub form_modal: Option<E>,
    pub close_form_modal: Option<E>,
    pub lead_form: Option<E>,
    pub submit_btn: Option<E>,
    pub success_modal: Option<E>,
    pub telegram_btn: Option<E>,
    pub hours: Option<E>,
    pub minutes: Option<E>,
    pub seconds: Option<E>,
    pub user_name: Option<E>,
    pub user_phone: Option<E>,
    pub body: Option<E>,
}

impl<E> ElementRegistry<E> {
    pub fn resolve<L>(lookup: &L) -> Self
    where
        L: ElementLookup<Element = E>,
    {
        let find = |id: &str| {
            let found = lookup.element(id);
            if found.is_none() {
                debug!("Element #{} not found, dependent behaviour disabled", id);
            }
            found
        };

        Self {
            open_form_btn: find(ids::OPEN_FORM_BTN),
            form_modal: find(ids::FORM_MODAL),
            close_form_modal: find(ids::CLOSE_FORM_MODAL),
            lead_form: find(ids::LEAD_FORM),
            submit_btn: find(ids::SUBMIT_BTN),
            success_modal: find(ids::SUCCESS_MODAL),
            telegram_btn: find(ids::TELEGRAM_BTN),
            hours: find(ids::HOURS),
            minutes: find(ids::MINUTES),
            seconds: find(ids::SECONDS),
            user_name: find(ids::USER_NAME),
            user_phone: find(ids::USER_PHONE),
            body: lookup.body(),
        }
    }

    /// Form, both inputs and the submit control. Without all of them there
    /// is no submission feature at all.
    pub fn form_parts(&self) -> Option<(&E, &E, &E, &E)> {
        Some((
            self.lead_form.as_ref()?,
            self.user_name.as_ref()?,
            self.user_phone.as_ref()?,
            self.submit_btn.as_ref()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fakes::FakeLookup;
    use crate::ports::UiElement;

    const ALL: [&str; 12] = [
        ids::OPEN_FORM_BTN,
        ids::FORM_MODAL,
        ids::CLOSE_FORM_MODAL,
        ids::LEAD_FORM,
        ids::SUBMIT_BTN,
        ids::SUCCESS_MODAL,
        ids::TELEGRAM_BTN,
        ids::HOURS,
        ids::MINUTES,
        ids::SECONDS,
        ids::USER_NAME,
        ids::USER_PHONE,
    ];

    #[test]
    fn test_resolves_every_named_element() {
        let lookup = FakeLookup::with_ids(&ALL);
        let registry = ElementRegistry::resolve(&lookup);

        assert!(registry.form_parts().is_some());
        assert!(registry.body.is_some());
        registry.hours.as_ref().unwrap().set_text("05");
        assert_eq!(lookup.get(ids::HOURS).text(), "05");
    }

    #[test]
    fn test_missing_elements_resolve_to_none() {
        let lookup = FakeLookup::with_ids(&[ids::HOURS, ids::LEAD_FORM]);
        let registry = ElementRegistry::resolve(&lookup);

        assert!(registry.hours.is_some());
        assert!(registry.minutes.is_none());
        assert!(registry.telegram_btn.is_none());
    }

    #[test]
    fn test_form_needs_inputs_and_submit() {
        let lookup = FakeLookup::with_ids(&[ids::LEAD_FORM, ids::USER_NAME, ids::SUBMIT_BTN]);
        assert!(ElementRegistry::resolve(&lookup).form_parts().is_none());
    }
}
