//! A toy village: random-walk contagion plus a daily wage economy.
//!
//! One step is one day.  People wander around their house, infect
//! susceptible neighbours within `contagion_distance`, and earn a wage at
//! their employer while they are well enough to work.  Hospitalized and
//! severe cases are moved to the hospital.  When the severe share of the
//! population exceeds the critical limit, severe cases die twice as often.

use epi_core::{
    Bounds, EntityId, InfectionSeverity, Position, Quintile, StatKind, Status, StepRecord,
};
use epi_sim::{Business, Facility, Household, Person, SimError, SimResult, Simulation, Topology};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct VillageParams {
    pub population:           usize,
    pub houses:               usize,
    pub businesses:           usize,
    pub initial_infected:     usize,
    pub bounds:               Bounds,
    /// Largest distance walked per day along each axis.
    pub walk:                 f64,
    pub contagion_distance:   f64,
    /// Chance per day that an exposed susceptible person is infected.
    pub contagion_rate:       f64,
    /// Days before an infection shows its severity.
    pub incubation_days:      u32,
    /// Days from infection to recovery or death.
    pub illness_days:         u32,
    pub asymptomatic_rate:    f64,
    pub hospitalization_rate: f64,
    pub severe_rate:          f64,
    pub severe_death_rate:    f64,
    /// Severe share of the population the hospital can handle.
    pub critical_limit:       f64,
    pub employment_rate:      f64,
    pub wage:                 f64,
    pub living_cost:          f64,
}

impl Default for VillageParams {
    fn default() -> Self {
        Self {
            population:           200,
            houses:               50,
            businesses:           8,
            initial_infected:     5,
            bounds:               Bounds::new(100.0, 100.0),
            walk:                 4.0,
            contagion_distance:   3.0,
            contagion_rate:       0.3,
            incubation_days:      3,
            illness_days:         14,
            asymptomatic_rate:    0.4,
            hospitalization_rate: 0.1,
            severe_rate:          0.05,
            severe_death_rate:    0.3,
            critical_limit:       0.02,
            employment_rate:      0.7,
            wage:                 12.0,
            living_cost:          8.0,
        }
    }
}

/// Per-person state the collaborator keeps beside the public [`Person`].
#[derive(Clone, Debug)]
struct Resident {
    house:    usize,
    employer: Option<usize>,
    wealth:   f64,
    /// Days since infection; only meaningful while infected.
    sick_for: u32,
}

pub struct Village {
    params:      VillageParams,
    rng:         SmallRng,
    people:      Vec<Person>,
    residents:   Vec<Resident>,
    hospital:    Facility,
    houses:      Vec<Household>,
    business:    Vec<Business>,
    initialized: bool,
    day:         u64,
}

impl Village {
    /// Lay out buildings and residents.  Nobody is infected until
    /// `initialize()`.
    pub fn new(params: VillageParams, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let bounds = params.bounds;
        let random_position =
            |rng: &mut SmallRng| Position::new(rng.gen_range(0.0..bounds.length), rng.gen_range(0.0..bounds.height));

        let hospital = Facility {
            id:       EntityId(0),
            position: Position::new(bounds.length / 2.0, bounds.height / 2.0),
        };
        let houses: Vec<Household> = (0..params.houses)
            .map(|i| Household {
                id:        EntityId(1 + i as u64),
                position:  random_position(&mut rng),
                homemates: Vec::new(),
            })
            .collect();
        let business: Vec<Business> = (0..params.businesses)
            .map(|i| Business {
                id:        EntityId(1 + (params.houses + i) as u64),
                position:  random_position(&mut rng),
                employees: Vec::new(),
            })
            .collect();

        let first_person = 1 + (params.houses + params.businesses) as u64;
        let mut people = Vec::with_capacity(params.population);
        let mut residents = Vec::with_capacity(params.population);
        for i in 0..params.population {
            let house = i % params.houses.max(1);
            let home = houses.get(house).map_or(hospital.position, |h| h.position);
            let employer = (params.businesses > 0 && rng.gen_bool(params.employment_rate))
                .then(|| rng.gen_range(0..params.businesses));
            // Skewed initial wealth: most people poor, a few rich.
            let wealth = 10.0 + 1000.0 * rng.gen_range(0.0f64..1.0).powi(3);
            people.push(Person::new(EntityId(first_person + i as u64), home, Status::Susceptible));
            residents.push(Resident { house, employer, wealth, sick_for: 0 });
        }

        let mut village = Self {
            params,
            rng,
            people,
            residents,
            hospital,
            houses,
            business,
            initialized: false,
            day: 0,
        };
        village.update_memberships();
        village
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    fn share(&self, pred: impl Fn(&Person) -> bool) -> f64 {
        if self.people.is_empty() {
            return 0.0;
        }
        self.people.iter().filter(|p| pred(p)).count() as f64 / self.people.len() as f64
    }

    fn in_hospital(p: &Person) -> bool {
        p.status == Status::Infected
            && matches!(p.severity, InfectionSeverity::Hospitalization | InfectionSeverity::Severe)
    }

    fn walk(&mut self) {
        let bounds = self.params.bounds;
        let walk = self.params.walk;
        for (person, resident) in self.people.iter_mut().zip(&self.residents) {
            match person.status {
                Status::Death => continue,
                _ if Self::in_hospital(person) => {
                    person.position = self.hospital.position;
                    continue;
                }
                _ => {}
            }
            let home = self.houses.get(resident.house).map_or(self.hospital.position, |h| h.position);
            let dx = self.rng.gen_range(-walk..=walk) + (home.x - person.position.x) * 0.1;
            let dy = self.rng.gen_range(-walk..=walk) + (home.y - person.position.y) * 0.1;
            person.position = bounds.clamp(Position::new(person.position.x + dx, person.position.y + dy));
        }
    }

    fn spread(&mut self) {
        let sources: Vec<Position> = self
            .people
            .iter()
            .filter(|p| p.status == Status::Infected && !Self::in_hospital(p))
            .map(|p| p.position)
            .collect();
        let reach = self.params.contagion_distance;
        for (person, resident) in self.people.iter_mut().zip(self.residents.iter_mut()) {
            if person.status != Status::Susceptible {
                continue;
            }
            let exposed = sources.iter().any(|s| s.distance(person.position) <= reach);
            if exposed && self.rng.gen_bool(self.params.contagion_rate) {
                person.status = Status::Infected;
                person.severity = InfectionSeverity::Exposed;
                resident.sick_for = 0;
            }
        }
    }

    fn progress(&mut self) {
        let p = &self.params;
        let overloaded = self.share(|q| q.status == Status::Infected && q.severity == InfectionSeverity::Severe)
            > p.critical_limit;
        let death_rate = if overloaded { (p.severe_death_rate * 2.0).min(1.0) } else { p.severe_death_rate };

        for (person, resident) in self.people.iter_mut().zip(self.residents.iter_mut()) {
            if person.status != Status::Infected {
                continue;
            }
            resident.sick_for += 1;
            if resident.sick_for == p.incubation_days {
                let roll: f64 = self.rng.r#gen();
                person.severity = if roll < p.severe_rate {
                    InfectionSeverity::Severe
                } else if roll < p.severe_rate + p.hospitalization_rate {
                    InfectionSeverity::Hospitalization
                } else if roll < p.severe_rate + p.hospitalization_rate + p.asymptomatic_rate {
                    InfectionSeverity::Asymptomatic
                } else {
                    InfectionSeverity::Exposed
                };
            }
            if resident.sick_for >= p.illness_days {
                let dies = person.severity == InfectionSeverity::Severe && self.rng.gen_bool(death_rate);
                person.status = if dies { Status::Death } else { Status::RecoveredImmune };
                if !dies {
                    person.position = self.houses.get(resident.house).map_or(person.position, |h| h.position);
                }
            }
        }
    }

    fn trade(&mut self) {
        for (person, resident) in self.people.iter().zip(self.residents.iter_mut()) {
            if person.status == Status::Death {
                continue;
            }
            if resident.employer.is_some() && !Self::in_hospital(person) {
                resident.wealth += self.params.wage;
            }
            resident.wealth = (resident.wealth - self.params.living_cost).max(0.0);
        }
    }

    fn update_memberships(&mut self) {
        for h in &mut self.houses {
            h.homemates.clear();
        }
        for b in &mut self.business {
            b.employees.clear();
        }
        for (person, resident) in self.people.iter().zip(&self.residents) {
            if person.status == Status::Death {
                continue;
            }
            if let Some(house) = self.houses.get_mut(resident.house) {
                house.homemates.push(person.id);
            }
            if let Some(employer) = resident.employer {
                if !Self::in_hospital(person) {
                    self.business[employer].employees.push(person.id);
                }
            }
        }
    }

    fn info(&self) -> StepRecord {
        let infected = |sev: InfectionSeverity| {
            move |p: &Person| p.status == Status::Infected && p.severity == sev
        };
        StepRecord::new()
            .with(Status::Susceptible.label(), self.share(|p| p.status == Status::Susceptible))
            .with(Status::Infected.label(), self.share(|p| p.status == Status::Infected))
            .with(Status::RecoveredImmune.label(), self.share(|p| p.status == Status::RecoveredImmune))
            .with(Status::Death.label(), self.share(|p| p.status == Status::Death))
            .with(InfectionSeverity::Asymptomatic.label(), self.share(infected(InfectionSeverity::Asymptomatic)))
            .with(
                InfectionSeverity::Hospitalization.label(),
                self.share(infected(InfectionSeverity::Hospitalization)),
            )
            .with(InfectionSeverity::Severe.label(), self.share(infected(InfectionSeverity::Severe)))
    }

    /// Total wealth of each population quintile, poorest first.
    fn ecom(&self) -> StepRecord {
        let mut wealth: Vec<f64> = self
            .people
            .iter()
            .zip(&self.residents)
            .filter(|(p, _)| p.status != Status::Death)
            .map(|(_, r)| r.wealth)
            .collect();
        wealth.sort_by(f64::total_cmp);

        let n = wealth.len();
        Quintile::ALL
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let slice = &wealth[i * n / 5..(i + 1) * n / 5];
                (q.label(), slice.iter().sum::<f64>())
            })
            .collect()
    }
}

impl Simulation for Village {
    fn initialize(&mut self) -> SimResult<()> {
        if self.initialized {
            return Err(SimError::Initialize("village already initialized".into()));
        }
        if self.people.is_empty() || self.houses.is_empty() {
            return Err(SimError::Initialize("village needs people and houses".into()));
        }
        let n = self.params.initial_infected.min(self.people.len());
        for _ in 0..n {
            let i = self.rng.gen_range(0..self.people.len());
            self.people[i].status = Status::Infected;
            self.people[i].severity = InfectionSeverity::Exposed;
        }
        self.initialized = true;
        Ok(())
    }

    fn execute(&mut self) -> SimResult<()> {
        if !self.initialized {
            return Err(SimError::Execute("village stepped before initialize".into()));
        }
        self.walk();
        self.spread();
        self.progress();
        self.trade();
        self.update_memberships();
        self.day += 1;
        Ok(())
    }

    fn population(&self) -> &[Person] {
        &self.people
    }

    fn statistics(&self, kind: StatKind) -> StepRecord {
        match kind {
            StatKind::Info => self.info(),
            StatKind::Ecom => self.ecom(),
        }
    }

    fn bounds(&self) -> Bounds {
        self.params.bounds
    }

    fn critical_limit(&self) -> f64 {
        self.params.critical_limit
    }

    fn topology(&self) -> Option<Topology<'_>> {
        Some(Topology {
            healthcare: &self.hospital,
            houses:     &self.houses,
            business:   &self.business,
        })
    }
}
