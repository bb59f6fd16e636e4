use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nalgebra::Vector3;

use crate::constants::{Radian, DEFAULT_ORBIT_RADIUS_AU, DPI};
use crate::errors::HeliopathError;
use crate::refine::plane::plane_normal;
use crate::refine::rotation::PlaneCorrection;

/// A position function over one revolution: orbital parameter (radians) → AU.
pub type OrbitFn = Arc<dyn Fn(Radian) -> Vector3<f64> + Send + Sync>;

/// Number of points sampled from an idealized orbit to estimate its plane.
const IDEAL_PLANE_SAMPLES: usize = 8;

/// Source of previously fetched actual positions for a (satellite, primary)
/// pair, in AU.
///
/// The on-disk trajectory cache implements this in the application; tests
/// inject in-memory maps. `None` means the cache has nothing usable for the
/// pair yet.
pub trait ActualSampleSource: Send + Sync {
    fn samples(&self, satellite: &str, primary: &str) -> Option<Vec<Vector3<f64>>>;
}

/// Explicit registry of idealized orbit functions keyed by (satellite,
/// primary), populated at startup.
///
/// Registered functions may already be composed with a primary-specific
/// reference-plane tilt; the engine treats them opaquely either way.
#[derive(Default)]
pub struct OrbitRegistry {
    orbits: HashMap<(String, String), OrbitFn>,
}

impl OrbitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, satellite: &str, primary: &str, orbit: OrbitFn) {
        self.orbits
            .insert((satellite.to_string(), primary.to_string()), orbit);
    }

    /// Convenience wrapper around [`register`](Self::register) for closures.
    pub fn register_fn<F>(&mut self, satellite: &str, primary: &str, orbit: F)
    where
        F: Fn(Radian) -> Vector3<f64> + Send + Sync + 'static,
    {
        self.register(satellite, primary, Arc::new(orbit));
    }

    fn get(&self, satellite: &str, primary: &str) -> Option<&OrbitFn> {
        self.orbits
            .get(&(satellite.to_string(), primary.to_string()))
    }
}

/// Quality tier a pair resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementTier {
    /// Idealized orbit rotated onto the plane observed in actual data.
    Refined,
    /// Idealized orbit as registered, no actual data to refine against.
    Idealized,
    /// Flat circular orbit at a nominal radius; nothing was available.
    Default,
}

/// A resolved orbit: quality tier, optional plane correction, and the
/// position function itself.
pub struct RefinedOrbit {
    tier: RefinementTier,
    correction: Option<PlaneCorrection>,
    position: OrbitFn,
}

impl RefinedOrbit {
    pub fn tier(&self) -> RefinementTier {
        self.tier
    }

    /// The solved plane correction; present only on the REFINED tier.
    pub fn correction(&self) -> Option<PlaneCorrection> {
        self.correction
    }

    /// Position at the given orbital parameter (AU).
    pub fn position_at(&self, parameter: Radian) -> Vector3<f64> {
        (self.position)(parameter)
    }
}

/// Resolves (satellite, primary) pairs to position functions through the
/// REFINED → IDEALIZED → DEFAULT fallback chain.
///
/// Each pair is resolved once on first request and memoized for the life of
/// the engine; [`invalidate`](Self::invalidate) drops a pinned resolution so
/// the next request re-runs the chain (e.g. after new actual data lands).
/// The cache is owned by the engine instance (independent engines do not
/// share resolutions) and is mutex-guarded, so concurrent first requests for
/// one pair resolve exactly once.
pub struct RefinementEngine {
    registry: OrbitRegistry,
    actual: Arc<dyn ActualSampleSource>,
    cache: Mutex<HashMap<(String, String), Arc<RefinedOrbit>>>,
}

impl RefinementEngine {
    pub fn new(registry: OrbitRegistry, actual: Arc<dyn ActualSampleSource>) -> Self {
        RefinementEngine {
            registry,
            actual,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the pair to a position function.
    ///
    /// By construction this never fails: the worst case is the DEFAULT tier's
    /// flat circular orbit, so downstream code always receives a callable.
    pub fn resolve(&self, satellite: &str, primary: &str) -> Arc<RefinedOrbit> {
        let key = (satellite.to_string(), primary.to_string());
        let mut cache = self.cache.lock().expect("refinement cache poisoned");
        if let Some(resolved) = cache.get(&key) {
            return resolved.clone();
        }

        let resolved = Arc::new(self.resolve_uncached(satellite, primary));
        cache.insert(key, resolved.clone());
        resolved
    }

    /// Drop a memoized resolution. Returns whether one was cached.
    pub fn invalidate(&self, satellite: &str, primary: &str) -> bool {
        self.cache
            .lock()
            .expect("refinement cache poisoned")
            .remove(&(satellite.to_string(), primary.to_string()))
            .is_some()
    }

    fn resolve_uncached(&self, satellite: &str, primary: &str) -> RefinedOrbit {
        let Some(idealized) = self.registry.get(satellite, primary) else {
            log::warn!(
                "no idealized orbit registered for {satellite} around {primary}; \
                 using default circular orbit"
            );
            return default_orbit();
        };

        match self.actual.samples(satellite, primary) {
            Some(actual) if actual.len() >= 3 => match refine(idealized, &actual) {
                Ok(refined) => {
                    log::debug!(
                        "refined orbit for {satellite} around {primary} \
                         (plane correction {:.4} rad)",
                        refined.correction.map(|c| c.angle()).unwrap_or(0.0)
                    );
                    refined
                }
                Err(err) => {
                    log::warn!(
                        "plane refinement for {satellite} around {primary} failed ({err}); \
                         keeping idealized orbit"
                    );
                    idealized_orbit(idealized.clone())
                }
            },
            Some(actual) => {
                log::debug!(
                    "{} actual samples for {satellite} around {primary}, need 3; \
                     keeping idealized orbit",
                    actual.len()
                );
                idealized_orbit(idealized.clone())
            }
            None => {
                log::debug!(
                    "no actual samples for {satellite} around {primary}; \
                     keeping idealized orbit"
                );
                idealized_orbit(idealized.clone())
            }
        }
    }
}

/// Rotate the idealized orbit onto the plane observed in the actual samples.
fn refine(idealized: &OrbitFn, actual: &[Vector3<f64>]) -> Result<RefinedOrbit, HeliopathError> {
    let ideal_samples: Vec<Vector3<f64>> = (0..IDEAL_PLANE_SAMPLES)
        .map(|i| idealized(DPI * i as f64 / IDEAL_PLANE_SAMPLES as f64))
        .collect();

    let ideal_normal = plane_normal(&ideal_samples)?;
    let actual_normal = plane_normal(actual)?;

    let correction = PlaneCorrection::between(&ideal_normal, &actual_normal);
    let rotation = correction.to_rotation();
    let idealized = idealized.clone();

    Ok(RefinedOrbit {
        tier: RefinementTier::Refined,
        correction: Some(correction),
        position: Arc::new(move |parameter| rotation * idealized(parameter)),
    })
}

fn idealized_orbit(position: OrbitFn) -> RefinedOrbit {
    RefinedOrbit {
        tier: RefinementTier::Idealized,
        correction: None,
        position,
    }
}

/// The guaranteed fallback: a flat circular orbit at a nominal radius.
fn default_orbit() -> RefinedOrbit {
    RefinedOrbit {
        tier: RefinementTier::Default,
        correction: None,
        position: Arc::new(|parameter| {
            Vector3::new(
                DEFAULT_ORBIT_RADIUS_AU * parameter.cos(),
                DEFAULT_ORBIT_RADIUS_AU * parameter.sin(),
                0.0,
            )
        }),
    }
}

#[cfg(test)]
mod engine_tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    /// In-memory sample source with interior mutability, standing in for the
    /// on-disk trajectory cache.
    #[derive(Default)]
    struct MapSource {
        samples: Mutex<HashMap<(String, String), Vec<Vector3<f64>>>>,
    }

    impl MapSource {
        fn insert(&self, satellite: &str, primary: &str, samples: Vec<Vector3<f64>>) {
            self.samples
                .lock()
                .unwrap()
                .insert((satellite.to_string(), primary.to_string()), samples);
        }
    }

    impl ActualSampleSource for MapSource {
        fn samples(&self, satellite: &str, primary: &str) -> Option<Vec<Vector3<f64>>> {
            self.samples
                .lock()
                .unwrap()
                .get(&(satellite.to_string(), primary.to_string()))
                .cloned()
        }
    }

    fn flat_circle(radius: f64) -> OrbitFn {
        Arc::new(move |theta: Radian| Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0))
    }

    fn tilted_circle(radius: f64, tilt_deg: f64, count: usize) -> Vec<Vector3<f64>> {
        let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), tilt_deg.to_radians());
        (0..count)
            .map(|i| {
                let theta = DPI * i as f64 / count as f64;
                tilt * Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
            })
            .collect()
    }

    #[test]
    fn test_default_tier_always_returns_finite_positions() {
        let engine = RefinementEngine::new(OrbitRegistry::new(), Arc::new(MapSource::default()));
        let orbit = engine.resolve("Unknown", "Nowhere");
        assert_eq!(orbit.tier(), RefinementTier::Default);

        for i in 0..64 {
            let theta = DPI * i as f64 / 64.0;
            let position = orbit.position_at(theta);
            assert!(position.iter().all(|c| c.is_finite()));
            assert_relative_eq!(position.norm(), DEFAULT_ORBIT_RADIUS_AU, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_idealized_tier_without_actual_data() {
        let mut registry = OrbitRegistry::new();
        registry.register("Io", "Jupiter", flat_circle(0.0028));

        let engine = RefinementEngine::new(registry, Arc::new(MapSource::default()));
        let orbit = engine.resolve("Io", "Jupiter");
        assert_eq!(orbit.tier(), RefinementTier::Idealized);
        assert!(orbit.correction().is_none());
        assert_relative_eq!(
            orbit.position_at(0.0),
            Vector3::new(0.0028, 0.0, 0.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_refined_tier_aligns_plane_with_actual_data() {
        let mut registry = OrbitRegistry::new();
        registry.register("Moon", "Earth", flat_circle(0.00257));

        let source = MapSource::default();
        source.insert("Moon", "Earth", tilted_circle(0.00257, 30.0, 12));

        let engine = RefinementEngine::new(registry, Arc::new(source));
        let orbit = engine.resolve("Moon", "Earth");
        assert_eq!(orbit.tier(), RefinementTier::Refined);

        let correction = orbit.correction().expect("refined orbit has a correction");
        assert_relative_eq!(correction.angle(), 30_f64.to_radians(), epsilon = 1e-9);

        // Every refined position lies in the actual (tilted) plane.
        let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), 30_f64.to_radians());
        let actual_normal = tilt * Vector3::z();
        for i in 0..32 {
            let theta = DPI * i as f64 / 32.0;
            assert_relative_eq!(
                orbit.position_at(theta).dot(&actual_normal),
                0.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_degenerate_actual_geometry_falls_back_to_idealized() {
        let mut registry = OrbitRegistry::new();
        registry.register("Moon", "Earth", flat_circle(0.00257));

        let source = MapSource::default();
        let collinear: Vec<Vector3<f64>> =
            (0..8).map(|i| Vector3::new(i as f64 * 0.001, 0.0, 0.0)).collect();
        source.insert("Moon", "Earth", collinear);

        let engine = RefinementEngine::new(registry, Arc::new(source));
        let orbit = engine.resolve("Moon", "Earth");
        assert_eq!(orbit.tier(), RefinementTier::Idealized);
    }

    #[test]
    fn test_resolution_is_memoized_per_pair() {
        let engine = RefinementEngine::new(OrbitRegistry::new(), Arc::new(MapSource::default()));
        let first = engine.resolve("Unknown", "Nowhere");
        let second = engine.resolve("Unknown", "Nowhere");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalidate_reruns_the_fallback_chain() {
        let mut registry = OrbitRegistry::new();
        registry.register("Moon", "Earth", flat_circle(0.00257));

        let source = Arc::new(MapSource::default());
        let engine = RefinementEngine::new(registry, source.clone());

        let pinned = engine.resolve("Moon", "Earth");
        assert_eq!(pinned.tier(), RefinementTier::Idealized);

        // New actual data lands; the pinned resolution does not see it.
        source.insert("Moon", "Earth", tilted_circle(0.00257, 30.0, 12));
        assert!(Arc::ptr_eq(&pinned, &engine.resolve("Moon", "Earth")));

        assert!(engine.invalidate("Moon", "Earth"));
        let refreshed = engine.resolve("Moon", "Earth");
        assert_eq!(refreshed.tier(), RefinementTier::Refined);
        assert!(!engine.invalidate("Absent", "Pair"));
    }

    #[test]
    fn test_concurrent_first_resolution_yields_one_instance() {
        let engine = Arc::new(RefinementEngine::new(
            OrbitRegistry::new(),
            Arc::new(MapSource::default()),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.resolve("Unknown", "Nowhere"))
            })
            .collect();

        let resolved: Vec<Arc<RefinedOrbit>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        for orbit in &resolved[1..] {
            assert!(Arc::ptr_eq(&resolved[0], orbit));
        }
    }
}
