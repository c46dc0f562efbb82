//! Unit tests for the collaborator contract.

use epi_core::{Bounds, EntityId, Position, StatKind, Status, StepRecord};

use crate::{Facility, FixedSimulation, Household, Person, SimError, Simulation};

fn people() -> Vec<Person> {
    vec![
        Person::new(EntityId(10), Position::new(1.0, 2.0), Status::Susceptible),
        Person::new(EntityId(11), Position::new(3.0, 4.0), Status::Infected),
    ]
}

#[cfg(test)]
mod fixed_tests {
    use super::*;

    #[test]
    fn positions_follow_population_order() {
        let sim = FixedSimulation::new(Bounds::new(10.0, 10.0), 0.1).with_population(people());
        assert_eq!(sim.positions(), vec![Position::new(1.0, 2.0), Position::new(3.0, 4.0)]);
    }

    #[test]
    fn execute_requires_initialize() {
        let mut sim = FixedSimulation::new(Bounds::new(10.0, 10.0), 0.1);
        assert!(matches!(sim.execute(), Err(SimError::Execute(_))));
        sim.initialize().unwrap();
        sim.execute().unwrap();
        assert_eq!(sim.steps(), 1);
    }

    #[test]
    fn initialize_is_called_once() {
        let mut sim = FixedSimulation::new(Bounds::new(10.0, 10.0), 0.1);
        sim.initialize().unwrap();
        assert!(matches!(sim.initialize(), Err(SimError::Initialize(_))));
    }

    #[test]
    fn injected_failure() {
        let mut sim = FixedSimulation::new(Bounds::new(10.0, 10.0), 0.1).fail_after(2);
        sim.initialize().unwrap();
        sim.execute().unwrap();
        sim.execute().unwrap();
        assert!(sim.execute().is_err());
        assert_eq!(sim.steps(), 2);
    }

    #[test]
    fn statistics_by_kind() {
        let sim = FixedSimulation::new(Bounds::new(10.0, 10.0), 0.1)
            .with_statistics(StatKind::Info, StepRecord::new().with("Susceptible", 1.0))
            .with_statistics(StatKind::Ecom, StepRecord::new().with("Q1", 5.0));
        assert_eq!(sim.statistics(StatKind::Info).get("Susceptible"), Some(1.0));
        assert_eq!(sim.statistics(StatKind::Ecom).get("Q1"), Some(5.0));
    }

    #[test]
    fn topology_only_with_facility() {
        let sim = FixedSimulation::new(Bounds::new(10.0, 10.0), 0.1);
        assert!(sim.topology().is_none());

        let sim = sim.with_topology(
            Facility { id: EntityId(1), position: Position::new(5.0, 5.0) },
            vec![Household {
                id:        EntityId(2),
                position:  Position::new(1.0, 1.0),
                homemates: vec![EntityId(10)],
            }],
            vec![],
        );
        let topo = sim.topology().unwrap();
        assert_eq!(topo.healthcare.id, EntityId(1));
        assert_eq!(topo.houses[0].homemates, vec![EntityId(10)]);
        assert!(topo.business.is_empty());
    }

    #[test]
    fn boxed_simulation_delegates() {
        let mut sim: Box<dyn Simulation> =
            Box::new(FixedSimulation::new(Bounds::new(8.0, 4.0), 0.2).with_population(people()));
        sim.initialize().unwrap();
        sim.execute().unwrap();
        assert_eq!(sim.population().len(), 2);
        assert_eq!(sim.bounds(), Bounds::new(8.0, 4.0));
        assert!((sim.critical_limit() - 0.2).abs() < f64::EPSILON);
    }
}
