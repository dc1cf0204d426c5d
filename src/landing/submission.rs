use std::cell::Cell;
use std::rc::Rc;

use log::{error, info};

use crate::config::LandingConfig;
use crate::error::{FormField, LandingError, ValidationError};
use crate::landing::lead::{Lead, LeadStore};
use crate::landing::modal::ModalController;
use crate::landing::phone_mask::PhoneMask;
use crate::ports::{Handle, Ports, UiElement};

pub const ERROR_CLASS: &str = "error";
pub const LOADING_CLASS: &str = "loading";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Invalid(ValidationError),
    Saved,
    Failed,
}

pub fn validate(name: &str, phone: &str, config: &LandingConfig) -> Result<(), ValidationError> {
    if name.trim().chars().count() < config.min_name_len {
        return Err(ValidationError::NameTooShort);
    }
    if !PhoneMask::new(config.phone.clone()).is_complete(phone) {
        return Err(ValidationError::PhoneIncomplete);
    }
    Ok(())
}

pub struct LeadForm {
    pub name: Handle,
    pub phone: Handle,
    pub submit_btn: Handle,
    pub form_modal: Option<Handle>,
    pub success_modal: Option<Handle>,
}

impl LeadForm {
    fn field(&self, field: FormField) -> &Handle {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
        }
    }
}

/// Idle -> Validating -> Submitting -> Success | Failed -> Idle.
///
/// The only await is the delivery of the lead; once started a submission
/// runs to the end.
pub struct SubmissionFlow {
    config: Rc<LandingConfig>,
    form: LeadForm,
    modals: Rc<ModalController>,
    ports: Ports,
    state: Cell<SubmissionState>,
}

impl SubmissionFlow {
    pub fn new(config: Rc<LandingConfig>, form: LeadForm, modals: Rc<ModalController>, ports: Ports) -> Self {
        Self {
            config,
            form,
            modals,
            ports,
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub async fn submit(&self) -> SubmissionOutcome {
        self.state.set(SubmissionState::Validating);
        self.form.name.remove_class(ERROR_CLASS);
        self.form.phone.remove_class(ERROR_CLASS);

        let name = self.form.name.value();
        let phone = self.form.phone.value();
        if let Err(invalid) = validate(&name, &phone, &self.config) {
            let input = self.form.field(invalid.field());
            input.add_class(ERROR_CLASS);
            input.focus();
            self.state.set(SubmissionState::Idle);
            return SubmissionOutcome::Invalid(invalid);
        }

        self.state.set(SubmissionState::Submitting);
        self.form.submit_btn.add_class(LOADING_CLASS);

        let lead = Lead::new(&name, &phone, self.ports.clock.local_now(), &self.config.lead_source);
        let outcome = match self.deliver_and_store(lead).await {
            Ok(total) => {
                info!("Lead submitted, {} stored in total", total);
                self.state.set(SubmissionState::Success);
                self.show_success();
                self.form.name.set_value("");
                self.form.phone.set_value("");
                SubmissionOutcome::Saved
            }
            Err(e) => {
                error!("Lead submission failed: {}", e);
                self.state.set(SubmissionState::Failed);
                self.ports.notifier.alert(&self.config.failure_message);
                SubmissionOutcome::Failed
            }
        };

        self.form.submit_btn.remove_class(LOADING_CLASS);
        self.state.set(SubmissionState::Idle);
        outcome
    }

    async fn deliver_and_store(&self, lead: Lead) -> Result<usize, LandingError> {
        self.ports.transport.deliver(&lead).await?;
        LeadStore::new(&*self.ports.storage, &self.config.storage_key).append(lead)
    }

    fn show_success(&self) {
        if let Some(form_modal) = &self.form.form_modal {
            self.modals.close(&**form_modal);
        }
        if let Some(success_modal) = self.form.success_modal.clone() {
            let modals = self.modals.clone();
            self.ports.scheduler.schedule(
                self.config.success_open_delay_ms,
                Box::new(move || modals.open(&*success_modal)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landing::modal::ACTIVE_CLASS;
    use crate::ports::fakes::{FakeElement, FakePorts};
    use crate::ports::{handle, UiElement};
    use futures::executor::block_on;

    struct Page {
        name: Rc<FakeElement>,
        phone: Rc<FakeElement>,
        submit_btn: Rc<FakeElement>,
        form_modal: Rc<FakeElement>,
        success_modal: Rc<FakeElement>,
        body: Rc<FakeElement>,
        fakes: FakePorts,
        flow: SubmissionFlow,
    }

    fn page(name: &str, phone: &str) -> Page {
        let name_el = FakeElement::new();
        let phone_el = FakeElement::new();
        name_el.set_value(name);
        phone_el.set_value(phone);
        let submit_btn = FakeElement::new();
        let form_modal = FakeElement::new();
        let success_modal = FakeElement::new();
        let body = FakeElement::new();
        let fakes = FakePorts::new();

        let modals = Rc::new(ModalController::new(Some(handle(body.clone()))));
        modals.open(&*form_modal);

        let form = LeadForm {
            name: handle(name_el.clone()),
            phone: handle(phone_el.clone()),
            submit_btn: handle(submit_btn.clone()),
            form_modal: Some(handle(form_modal.clone())),
            success_modal: Some(handle(success_modal.clone())),
        };
        let flow = SubmissionFlow::new(Rc::new(LandingConfig::default()), form, modals, fakes.ports());

        Page {
            name: name_el,
            phone: phone_el,
            submit_btn,
            form_modal,
            success_modal,
            body,
            fakes,
            flow,
        }
    }

    fn stored(page: &Page) -> Vec<Lead> {
        LeadStore::new(&*page.fakes.storage, "leads").load().unwrap()
    }

    #[test]
    fn test_validate_rules() {
        let config = LandingConfig::default();
        assert_eq!(validate(" A ", "+998 90 123 45 67", &config), Err(ValidationError::NameTooShort));
        assert_eq!(validate("Al", "+998 90 123 45 6", &config), Err(ValidationError::PhoneIncomplete));
        assert_eq!(validate("Al", "+998 90 123 45 67", &config), Ok(()));
    }

    #[test]
    fn test_short_name_is_flagged_and_nothing_saved() {
        let page = page("A", "+998 90 123 45 67");

        let outcome = block_on(page.flow.submit());
        assert_eq!(outcome, SubmissionOutcome::Invalid(ValidationError::NameTooShort));
        assert!(page.name.has_class(ERROR_CLASS));
        assert_eq!(page.name.focus_count.get(), 1);
        assert!(!page.phone.has_class(ERROR_CLASS));
        assert!(page.fakes.storage.items.borrow().is_empty());
        assert!(page.fakes.transport.delivered.borrow().is_empty());
        assert!(page.form_modal.has_class(ACTIVE_CLASS));
        assert!(page.fakes.scheduler.delays().is_empty());
        assert_eq!(page.flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_incomplete_phone_is_flagged() {
        let page = page("Aziz", "+998 90 123");

        let outcome = block_on(page.flow.submit());
        assert_eq!(outcome, SubmissionOutcome::Invalid(ValidationError::PhoneIncomplete));
        assert!(page.phone.has_class(ERROR_CLASS));
        assert_eq!(page.phone.focus_count.get(), 1);
        assert!(!page.submit_btn.has_class(LOADING_CLASS));
    }

    #[test]
    fn test_errors_clear_on_next_attempt() {
        let page = page("A", "+998 90 123 45 67");
        block_on(page.flow.submit());
        page.name.set_value("Aziz");

        assert_eq!(block_on(page.flow.submit()), SubmissionOutcome::Saved);
        assert!(!page.name.has_class(ERROR_CLASS));
    }

    #[test]
    fn test_valid_submission_saves_one_lead_and_swaps_modals() {
        let page = page("  Aziz  ", "+998 90 123 45 67");

        assert_eq!(block_on(page.flow.submit()), SubmissionOutcome::Saved);

        let leads = stored(&page);
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Aziz");
        assert_eq!(leads[0].phone, "+998 90 123 45 67");
        assert_eq!(leads[0].source, "instagram_landing");

        assert!(!page.form_modal.has_class(ACTIVE_CLASS));
        assert!(!page.success_modal.has_class(ACTIVE_CLASS));
        assert_eq!(page.fakes.scheduler.delays(), vec![300]);

        page.fakes.scheduler.run_all();
        assert!(page.success_modal.has_class(ACTIVE_CLASS));
        assert_eq!(page.body.style("overflow").as_deref(), Some("hidden"));

        assert_eq!(page.name.value(), "");
        assert_eq!(page.phone.value(), "");
        assert!(!page.submit_btn.has_class(LOADING_CLASS));
        assert!(page.fakes.notifier.alerts.borrow().is_empty());
    }

    #[test]
    fn test_transport_failure_alerts_and_keeps_form() {
        let page = page("Aziz", "+998 90 123 45 67");
        page.fakes.transport.fail.set(true);

        assert_eq!(block_on(page.flow.submit()), SubmissionOutcome::Failed);
        assert_eq!(
            *page.fakes.notifier.alerts.borrow(),
            vec!["Xatolik yuz berdi. Iltimos qayta urinib ko'ring.".to_string()]
        );
        assert!(stored(&page).is_empty());
        assert!(page.form_modal.has_class(ACTIVE_CLASS));
        assert_eq!(page.name.value(), "Aziz");
        assert!(!page.submit_btn.has_class(LOADING_CLASS));
        assert_eq!(page.flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_storage_failure_is_reported_the_same_way() {
        let page = page("Aziz", "+998 90 123 45 67");
        page.fakes.storage.fail_writes.set(true);

        assert_eq!(block_on(page.flow.submit()), SubmissionOutcome::Failed);
        assert_eq!(page.fakes.notifier.alerts.borrow().len(), 1);
        assert!(page.fakes.scheduler.delays().is_empty());
        assert!(!page.submit_btn.has_class(LOADING_CLASS));
    }

    #[test]
    fn test_each_submission_appends() {
        let page = page("Aziz", "+998 90 123 45 67");
        block_on(page.flow.submit());
        page.name.set_value("Dilnoza");
        page.phone.set_value("+998 91 765 43 21");
        block_on(page.flow.submit());

        let names: Vec<_> = stored(&page).into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Aziz", "Dilnoza"]);
    }
}
