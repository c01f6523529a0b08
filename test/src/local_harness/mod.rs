/// Both execution contexts on one thread, wired through an in-memory
/// endpoint pair and driven by a manual clock

use std::{rc::Rc, time::Duration};

use tandem_logic::{BaseGameLogic, LogicConfig};
use tandem_render::{MainContext, MemoryLoader, RenderConfig, Scene};
use tandem_shared::{Clock, Endpoint, ManualClock};

const TICK: Duration = Duration::from_millis(16);

pub struct LocalHarness {
    pub logic: BaseGameLogic,
    pub main: MainContext,
    logic_endpoint: Endpoint,
    clock: Rc<ManualClock>,
}

impl LocalHarness {
    pub fn new(loader: MemoryLoader) -> Self {
        Self::with_config(loader, LogicConfig::default(), RenderConfig::default())
    }

    pub fn with_config(
        loader: MemoryLoader,
        logic_config: LogicConfig,
        render_config: RenderConfig,
    ) -> Self {
        let (logic_endpoint, main_endpoint) = Endpoint::pair();
        let clock = Rc::new(ManualClock::new());
        let logic = BaseGameLogic::new(logic_config, logic_endpoint.sender(), clock.clone());
        let main = MainContext::new(
            render_config,
            main_endpoint,
            Rc::new(loader),
            Box::new(Scene::new()),
            clock.clone(),
        );

        Self {
            logic,
            main,
            logic_endpoint,
            clock,
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Delivers everything the render side sent to the logic side. Returns
    /// how many envelopes were delivered.
    pub fn deliver_to_logic(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(Some(envelope)) = self.logic_endpoint.try_recv() {
            self.logic.handle_envelope(envelope);
            delivered += 1;
        }
        self.logic.pump();
        delivered
    }

    /// One frame: the render side answers and draws, then the logic side
    /// reads its messages and ticks
    pub fn step(&mut self) {
        self.clock.advance(TICK);
        let now = self.now();
        if let Err(err) = self.main.update(now) {
            panic!("render context failed: {}", err);
        }
        self.deliver_to_logic();
        self.logic.update(now, TICK);
    }

    pub fn steps(&mut self, count: usize) {
        for _ in 0..count {
            self.step();
        }
    }
}
