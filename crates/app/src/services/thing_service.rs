//! Thing service: use-cases for reading and driving things.

use std::sync::Arc;

use thinghub_domain::capability::{Actuator, Capability};
use thinghub_domain::error::{NotFoundError, ThingHubError};
use thinghub_domain::params::Params;
use thinghub_domain::thing::{Thing, ThingView};

use crate::ports::ThingRepository;

/// Application service behind the (external) API layer.
///
/// Every mutating call returns the refreshed [`ThingView`].
pub struct ThingService<R> {
    repo: R,
}

impl<R: ThingRepository> ThingService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Describe every thing.
    pub fn list_things(&self) -> Vec<ThingView> {
        self.repo
            .load_all()
            .iter()
            .map(|thing| thing.describe())
            .collect()
    }

    /// Describe one thing.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::NotFound`] when no thing with `id` exists.
    pub fn get_thing(&self, id: &str) -> Result<ThingView, ThingHubError> {
        self.find(id).map(|thing| thing.describe())
    }

    /// Run a named command on an actuator.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::NotFound`] for an unknown id,
    /// [`ThingHubError::NotCapable`] when the thing is not an actuator, or
    /// whatever the actuator's `execute` reports.
    #[tracing::instrument(skip(self, args))]
    pub fn execute(
        &self,
        id: &str,
        command: &str,
        args: &Params,
    ) -> Result<ThingView, ThingHubError> {
        self.drive(id, |actuator| actuator.execute(command, args))
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn activate(&self, id: &str) -> Result<ThingView, ThingHubError> {
        self.drive(id, |actuator| actuator.activate())
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn deactivate(&self, id: &str) -> Result<ThingView, ThingHubError> {
        self.drive(id, |actuator| actuator.deactivate())
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn toggle(&self, id: &str) -> Result<ThingView, ThingHubError> {
        self.drive(id, |actuator| actuator.toggle())
    }

    /// Enable every thing, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first thing that could not be enabled.
    #[tracing::instrument(skip(self))]
    pub fn enable_all(&self) -> Result<Vec<ThingView>, ThingHubError> {
        self.for_each_thing(|thing| thing.enable())
    }

    /// Disable every thing, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first thing that could not be disabled.
    #[tracing::instrument(skip(self))]
    pub fn disable_all(&self) -> Result<Vec<ThingView>, ThingHubError> {
        self.for_each_thing(|thing| thing.disable())
    }

    fn find(&self, id: &str) -> Result<Arc<dyn Thing>, ThingHubError> {
        self.repo.load(id).ok_or_else(|| {
            NotFoundError {
                entity: "Thing",
                id: id.to_string(),
            }
            .into()
        })
    }

    fn drive<F>(&self, id: &str, action: F) -> Result<ThingView, ThingHubError>
    where
        F: FnOnce(&dyn Actuator) -> Result<(), ThingHubError>,
    {
        let thing = self.find(id)?;
        let actuator = thing.as_actuator().ok_or_else(|| ThingHubError::NotCapable {
            thing: thing.id().clone(),
            capability: Capability::Actuator,
        })?;
        action(actuator)?;
        tracing::debug!(thing_id = %id, state = %actuator.state(), "actuator driven");
        Ok(thing.describe())
    }

    fn for_each_thing<F>(&self, action: F) -> Result<Vec<ThingView>, ThingHubError>
    where
        F: Fn(&dyn Thing) -> Result<(), ThingHubError>,
    {
        let things = self.repo.load_all();
        for thing in &things {
            action(thing.as_ref())?;
        }
        Ok(things.iter().map(|thing| thing.describe()).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use thinghub_domain::capability::{AttributeValue, Attributes, State, ThingState};
    use thinghub_domain::connection::Connection;
    use thinghub_domain::id::ConnectionId;
    use thinghub_domain::metadata::ThingMetadata;

    #[derive(Debug)]
    struct Hub {
        id: ConnectionId,
        alive: bool,
    }

    impl Connection for Hub {
        fn id(&self) -> &ConnectionId {
            &self.id
        }

        fn is_alive(&self) -> bool {
            self.alive
        }
    }

    #[derive(Debug)]
    struct Fan {
        metadata: ThingMetadata,
        connection: Arc<dyn Connection>,
        enabled: AtomicBool,
        state: Mutex<ThingState>,
        boosted: AtomicBool,
    }

    impl Thing for Fan {
        fn metadata(&self) -> &ThingMetadata {
            &self.metadata
        }

        fn connection(&self) -> &Arc<dyn Connection> {
            &self.connection
        }

        fn is_enabled(&self) -> bool {
            self.enabled.load(Ordering::SeqCst)
        }

        fn enable(&self) -> Result<(), ThingHubError> {
            if !self.connection.is_alive() {
                return Err(ThingHubError::ConnectionUnavailable(
                    self.connection.id().clone(),
                ));
            }
            self.enabled.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn disable(&self) -> Result<(), ThingHubError> {
            self.enabled.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn as_state(&self) -> Option<&dyn State> {
            Some(self)
        }

        fn as_actuator(&self) -> Option<&dyn Actuator> {
            Some(self)
        }
    }

    impl State for Fan {
        fn state(&self) -> ThingState {
            *self.state.lock().unwrap()
        }

        fn attributes(&self) -> Attributes {
            let mut attributes = Attributes::new();
            attributes.insert("boost".to_string(), self.boosted.load(Ordering::SeqCst).into());
            attributes
        }
    }

    impl Actuator for Fan {
        fn commands(&self) -> Vec<&'static str> {
            vec!["activate", "deactivate", "toggle", "boost"]
        }

        fn activate(&self) -> Result<(), ThingHubError> {
            *self.state.lock().unwrap() = ThingState::Active;
            Ok(())
        }

        fn deactivate(&self) -> Result<(), ThingHubError> {
            *self.state.lock().unwrap() = ThingState::Inactive;
            Ok(())
        }

        fn execute_custom(&self, command: &str, _args: &Params) -> Result<(), ThingHubError> {
            match command {
                "boost" => {
                    self.boosted.store(true, Ordering::SeqCst);
                    self.activate()
                }
                other => Err(ThingHubError::unsupported_command(other)),
            }
        }
    }

    #[derive(Debug)]
    struct Thermometer {
        metadata: ThingMetadata,
        connection: Arc<dyn Connection>,
        enabled: AtomicBool,
    }

    impl Thing for Thermometer {
        fn metadata(&self) -> &ThingMetadata {
            &self.metadata
        }

        fn connection(&self) -> &Arc<dyn Connection> {
            &self.connection
        }

        fn is_enabled(&self) -> bool {
            self.enabled.load(Ordering::SeqCst)
        }

        fn enable(&self) -> Result<(), ThingHubError> {
            self.enabled.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn disable(&self) -> Result<(), ThingHubError> {
            self.enabled.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn as_state(&self) -> Option<&dyn State> {
            Some(self)
        }
    }

    impl State for Thermometer {
        fn state(&self) -> ThingState {
            ThingState::Unknown
        }
    }

    struct InMemoryThingRepo {
        things: Vec<Arc<dyn Thing>>,
    }

    impl ThingRepository for InMemoryThingRepo {
        fn load_all(&self) -> Vec<Arc<dyn Thing>> {
            self.things.clone()
        }

        fn load(&self, id: &str) -> Option<Arc<dyn Thing>> {
            self.things.iter().find(|t| t.id().as_str() == id).cloned()
        }
    }

    fn metadata(id: &str, thing_type: &str) -> ThingMetadata {
        ThingMetadata::builder()
            .id(id)
            .thing_type(thing_type)
            .placement("attic")
            .build()
            .unwrap()
    }

    fn hub(alive: bool) -> Arc<dyn Connection> {
        Arc::new(Hub {
            id: ConnectionId::new(if alive { "hub" } else { "dead-hub" }),
            alive,
        })
    }

    fn fan(id: &str, connection: Arc<dyn Connection>) -> Arc<dyn Thing> {
        Arc::new(Fan {
            metadata: metadata(id, "fan"),
            connection,
            enabled: AtomicBool::new(false),
            state: Mutex::new(ThingState::Inactive),
            boosted: AtomicBool::new(false),
        })
    }

    fn thermometer(id: &str) -> Arc<dyn Thing> {
        Arc::new(Thermometer {
            metadata: metadata(id, "thermometer"),
            connection: hub(true),
            enabled: AtomicBool::new(false),
        })
    }

    fn service(things: Vec<Arc<dyn Thing>>) -> ThingService<InMemoryThingRepo> {
        ThingService::new(InMemoryThingRepo { things })
    }

    fn state_of(view: &ThingView) -> Option<ThingState> {
        view.state.as_ref().map(|s| s.state)
    }

    #[test]
    fn should_list_every_thing() {
        let svc = service(vec![fan("fan", hub(true)), thermometer("temp")]);
        let views = svc.list_things();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id.as_str(), "fan");
        assert_eq!(views[1].commands, None);
    }

    #[test]
    fn should_return_not_found_when_id_unknown() {
        let svc = service(vec![fan("fan", hub(true))]);
        let err = svc.get_thing("ghost").unwrap_err();
        assert!(matches!(err, ThingHubError::NotFound(_)));
        assert_eq!(err.to_string(), "Thing `ghost` not found");
    }

    #[test]
    fn should_activate_and_report_new_state() {
        let svc = service(vec![fan("fan", hub(true))]);
        let view = svc.activate("fan").unwrap();
        assert_eq!(state_of(&view), Some(ThingState::Active));
        let view = svc.deactivate("fan").unwrap();
        assert_eq!(state_of(&view), Some(ThingState::Inactive));
    }

    #[test]
    fn should_return_to_inactive_after_two_toggles() {
        let svc = service(vec![fan("fan", hub(true))]);
        assert_eq!(
            state_of(&svc.toggle("fan").unwrap()),
            Some(ThingState::Active)
        );
        assert_eq!(
            state_of(&svc.toggle("fan").unwrap()),
            Some(ThingState::Inactive)
        );
    }

    #[test]
    fn should_run_custom_command_through_execute() {
        let svc = service(vec![fan("fan", hub(true))]);
        let view = svc.execute("fan", "boost", &Params::new()).unwrap();
        let snapshot = view.state.unwrap();
        assert_eq!(snapshot.state, ThingState::Active);
        assert_eq!(snapshot.attributes["boost"], AttributeValue::Bool(true));
    }

    #[test]
    fn should_reject_unlisted_command() {
        let svc = service(vec![fan("fan", hub(true))]);
        let err = svc.execute("fan", "explode", &Params::new()).unwrap_err();
        assert!(matches!(err, ThingHubError::UnsupportedCommand { command } if command == "explode"));
    }

    #[test]
    fn should_fail_with_not_capable_when_thing_is_not_actuator() {
        let svc = service(vec![thermometer("temp")]);
        let err = svc.toggle("temp").unwrap_err();
        assert!(matches!(
            err,
            ThingHubError::NotCapable {
                capability: Capability::Actuator,
                ..
            }
        ));
    }

    #[test]
    fn should_enable_all_and_report_enabled_views() {
        let svc = service(vec![fan("fan", hub(true)), thermometer("temp")]);
        let views = svc.enable_all().unwrap();
        assert!(views.iter().all(|v| v.enabled));
        assert_eq!(state_of(&views[0]), Some(ThingState::Inactive));

        let views = svc.disable_all().unwrap();
        assert!(views.iter().all(|v| !v.enabled));
    }

    #[test]
    fn should_stop_enable_all_at_first_failure() {
        let svc = service(vec![
            fan("a", hub(true)),
            fan("b", hub(false)),
            fan("c", hub(true)),
        ]);
        let err = svc.enable_all().unwrap_err();
        assert!(matches!(err, ThingHubError::ConnectionUnavailable(_)));
        assert!(svc.get_thing("a").unwrap().enabled);
        assert!(!svc.get_thing("c").unwrap().enabled);
    }
}
