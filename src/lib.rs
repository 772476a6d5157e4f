pub mod camera;
pub mod display;
pub mod game;
pub mod gui;
pub mod input;
pub mod math;
pub mod render;
pub mod settings;
pub mod state;
pub mod texture;

use anyhow::Context;
use env_logger::Env;
use settings::Settings;
use state::State;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
};

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::load_default()?;
    log::info!("starting with {:?}", settings);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut state = State::new(&event_loop, &settings).await?;

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == state.window().id() => {
                    if !state.input(event) {
                        match event {
                            WindowEvent::Resized(physical_size) => {
                                state.resize(*physical_size);
                            }
                            WindowEvent::RedrawRequested => {
                                state.update();
                                match state.render() {
                                    Ok(_) => {}
                                    Err(
                                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                                    ) => state.resize(state.size()),
                                    Err(wgpu::SurfaceError::OutOfMemory) => {
                                        log::error!("out of GPU memory");
                                        state.request_close();
                                    }
                                    Err(e) => log::warn!("{:?}", e),
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    state.window().request_redraw();
                }
                _ => {}
            }

            if state.is_close_requested() && !elwt.exiting() {
                state.destroy();
                elwt.exit();
            }
        })
        .context("event loop failed")?;
    Ok(())
}
