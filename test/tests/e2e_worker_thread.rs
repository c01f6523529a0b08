/// End-to-end test with the logic context on its own worker thread
/// Covers the boot handshake, game-specific setup and a level load driven
/// from the render context
use std::{
    cell::Cell,
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

use serde_json::json;

use tandem_logic::{spawn_worker, LogicConfig};
use tandem_render::{MainContext, RenderConfig, Scene};
use tandem_shared::SystemClock;
use tandem_test::{sample_loader, CountingScript};

fn config() -> LogicConfig {
    LogicConfig {
        tick_interval: Duration::from_millis(2),
        ..LogicConfig::default()
    }
}

#[test]
fn render_context_drives_a_worker() {
    let _ = env_logger::builder().is_test(true).try_init();
    let handle = spawn_worker(config(), |logic| {
        let ticks = Rc::new(Cell::new(0));
        logic
            .scripts()
            .register("counting", move || Box::new(CountingScript::new(ticks.clone())));
        Ok(())
    })
    .unwrap();
    let (endpoint, thread) = handle.into_parts();

    let render_config = RenderConfig {
        game_options: json!({ "players": 1 }),
        ..RenderConfig::default()
    };
    let clock = Rc::new(SystemClock::new());
    let mut main = MainContext::new(
        render_config,
        endpoint,
        Rc::new(sample_loader()),
        Box::new(Scene::new()),
        clock,
    );
    main.load_game("levels/level1.json").unwrap();

    let started = Instant::now();
    while main.scene().actor_count() < 3 {
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "level never reached the scene"
        );
        main.update(started.elapsed()).unwrap();
        thread::sleep(Duration::from_millis(1));
    }

    main.shutdown();
    thread.join().unwrap();
}
