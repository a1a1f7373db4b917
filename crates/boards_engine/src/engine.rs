use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use boards_core::{
    progress_coordinator, watchers, Action, BoardsConfig, TaskContext, TaskError, Watcher,
};
use boards_logging::{boards_debug, boards_error, boards_info};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{ActionBus, BoardsApi, BusInterpreter, StateStore, Subscription};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("engine thread panicked")]
    ThreadPanicked,
}

/// The root process: every watcher plus the progress coordinator.
///
/// Must be started from inside a tokio runtime.
pub struct Engine {
    bus: Arc<ActionBus>,
    processes: Vec<JoinHandle<()>>,
}

impl Engine {
    /// Subscribes every watcher and the coordinator, then spawns them.
    ///
    /// Actions dispatched after this returns are seen by all of them.
    pub fn start(
        config: BoardsConfig,
        api: Arc<dyn BoardsApi>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        let bus = Arc::new(ActionBus::new());
        let config = Arc::new(config);
        let task_ctx = TaskContext::new(
            Arc::new(BusInterpreter::new(api.clone(), bus.clone(), store.clone())),
            config.clone(),
        );

        let mut processes = Vec::new();
        for watcher in watchers() {
            let subscription = bus.subscribe();
            processes.push(tokio::spawn(run_watcher(
                watcher,
                subscription,
                task_ctx.clone(),
            )));
        }

        let coordinator = BusInterpreter::new(api, bus.clone(), store)
            .with_subscription(bus.subscribe());
        let coordinator_ctx = TaskContext::new(Arc::new(coordinator), config);
        processes.push(tokio::spawn(async move {
            match progress_coordinator(coordinator_ctx).await {
                Ok(()) | Err(TaskError::BusClosed) => {
                    boards_debug!("progress coordinator stopped");
                }
                Err(err) => boards_error!("progress coordinator failed: {}", err),
            }
        }));

        boards_info!("engine started with {} processes", processes.len());
        Self { bus, processes }
    }

    pub fn dispatch(&self, action: Action) {
        boards_debug!("dispatch {}", action.action_type());
        self.bus.publish(action);
    }

    /// Observes every action dispatched from now on, task results included.
    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    pub fn bus(&self) -> Arc<ActionBus> {
        self.bus.clone()
    }

    /// Closes the bus and waits for the watchers and the coordinator to drain.
    ///
    /// Tasks already spawned keep running; their puts are dropped.
    pub async fn shutdown(self) {
        self.bus.close();
        for process in self.processes {
            if let Err(err) = process.await {
                boards_error!("engine process ended abnormally: {}", err);
            }
        }
        boards_info!("engine stopped");
    }
}

async fn run_watcher(watcher: Watcher, mut subscription: Subscription, ctx: TaskContext) {
    while let Some(action) = subscription.next_matching(watcher.pattern).await {
        let action_type = action.action_type();
        let Some(task) = watcher.start(action, ctx.clone()) else {
            continue;
        };
        boards_debug!("{} spawned for {}", watcher.name, action_type);
        let name = watcher.name;
        tokio::spawn(async move {
            if let Err(err) = task.await {
                boards_error!("{} task failed: {}", name, err);
            }
        });
    }
    boards_debug!("watcher {} stopped", watcher.name);
}

enum EngineCommand {
    Dispatch(Action),
    Shutdown,
}

/// An [`Engine`] on its own thread and runtime, for hosts without one.
///
/// Every action on the bus is mirrored into a queue the host polls.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<Action>,
    thread: thread::JoinHandle<()>,
}

impl EngineHandle {
    pub fn start(
        config: BoardsConfig,
        api: Arc<dyn BoardsApi>,
        store: Arc<dyn StateStore>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        let thread = thread::spawn(move || {
            let engine = {
                let _guard = runtime.enter();
                Engine::start(config, api, store)
            };

            let mut mirror = engine.subscribe();
            runtime.spawn(async move {
                while let Some(action) = mirror.recv().await {
                    if event_tx.send(action).is_err() {
                        break;
                    }
                }
            });

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Dispatch(action) => engine.dispatch(action),
                    EngineCommand::Shutdown => break,
                }
            }
            runtime.block_on(engine.shutdown());
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            thread,
        })
    }

    pub fn dispatch(&self, action: Action) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch(action));
    }

    pub fn try_recv(&self) -> Option<Action> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Action> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Stops the engine and joins its thread.
    pub fn shutdown(self) -> Result<(), EngineError> {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        self.thread
            .join()
            .map_err(|_| EngineError::ThreadPanicked)
    }
}
