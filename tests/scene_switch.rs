use folio_wasm::scene::{
    GeometryBackend, PointerTarget, Scene, SceneState, SceneStore, SceneVariant,
};

fn fixed_rng() -> impl FnMut() -> f32 {
    let mut state = 0x1357_9bdfu32;
    move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 8) as f32 / 16_777_216.0
    }
}

#[derive(Default)]
struct CountingBackend {
    live: usize,
    built: usize,
    released: usize,
}

impl GeometryBackend for CountingBackend {
    type Handle = usize;
    type Error = ();

    fn build(&mut self, _scene: &Scene) -> Result<usize, ()> {
        self.built += 1;
        self.live += 1;
        Ok(self.built)
    }

    fn release(&mut self, _handle: usize) {
        self.released += 1;
        self.live -= 1;
    }
}

#[test]
fn switching_keeps_exactly_one_handle_live() {
    let mut rng = fixed_rng();
    let mut state = SceneState::new(SceneVariant::ParticleField, &mut rng);
    let mut backend = CountingBackend::default();
    let mut store = SceneStore::new();

    store.install(&mut backend, &state.scene).unwrap();
    assert_eq!(backend.live, 1);

    for variant in [
        SceneVariant::WaveGrid,
        SceneVariant::OrbCluster,
        SceneVariant::ParticleField,
    ] {
        state.switch_to(variant, &mut rng);
        store.install(&mut backend, &state.scene).unwrap();
        assert_eq!(state.variant(), variant);
        assert_eq!(backend.live, 1, "exactly one geometry handle after switch");
    }

    assert_eq!(backend.built, 4);
    assert_eq!(backend.released, 3);
}

#[test]
fn initial_variant_is_the_particle_field() {
    let mut rng = fixed_rng();
    let state = SceneState::new(SceneVariant::ParticleField, &mut rng);
    assert_eq!(state.variant(), SceneVariant::ParticleField);
    assert!(matches!(state.scene, Scene::ParticleField(_)));
}

#[test]
fn tick_advances_the_wall_clock() {
    let mut rng = fixed_rng();
    let mut state = SceneState::new(SceneVariant::WaveGrid, &mut rng);
    for _ in 0..10 {
        state.tick(1.0 / 60.0, PointerTarget::default());
    }
    assert!((state.elapsed() - 10.0 / 60.0).abs() < 1e-5);
}

#[test]
fn tick_mutates_particle_geometry_in_place() {
    let mut rng = fixed_rng();
    let mut state = SceneState::new(SceneVariant::ParticleField, &mut rng);
    let before = match &state.scene {
        Scene::ParticleField(field) => field.positions().to_vec(),
        _ => unreachable!(),
    };
    state.tick(1.0 / 60.0, PointerTarget { x: 0.2, y: 0.1 });
    let Scene::ParticleField(field) = &state.scene else {
        unreachable!();
    };
    assert_ne!(before, field.positions());
    let (rx, ry) = field.rotation();
    assert!(rx != 0.0 || ry != 0.0);
}

#[test]
fn switch_requests_are_honoured_verbatim() {
    let mut rng = fixed_rng();
    let mut state = SceneState::new(SceneVariant::ParticleField, &mut rng);
    state.switch_to(SceneVariant::OrbCluster, &mut rng);
    assert!(matches!(state.scene, Scene::OrbCluster(_)));
    state.switch_to(SceneVariant::WaveGrid, &mut rng);
    assert!(matches!(state.scene, Scene::WaveGrid(_)));
}

#[test]
fn variant_names_round_trip() {
    for variant in [
        SceneVariant::ParticleField,
        SceneVariant::WaveGrid,
        SceneVariant::OrbCluster,
    ] {
        assert_eq!(SceneVariant::from_name(variant.name()), Some(variant));
    }
    assert_eq!(SceneVariant::from_name("lava-lamp"), None);
}

#[test]
fn pointer_target_is_centred_and_scaled() {
    let centre = PointerTarget::from_client(960.0, 540.0, 1920.0, 1080.0);
    assert_eq!(centre, PointerTarget::default());

    let offset = PointerTarget::from_client(1060.0, 440.0, 1920.0, 1080.0);
    assert!((offset.x - 0.1).abs() < 1e-6);
    assert!((offset.y + 0.1).abs() < 1e-6);
}
