//! Desktop preview for myrtio-drum-waves
//!
//! Runs the detector, sampler and animator loops on their own threads against
//! a simulated board. Drum pads and knobs are driven from the window.

use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_drum_waves::{
    AnalogInput, ChannelId, ConfigSampler, DetectorConfig, Duration, HitDetector,
    HitSimulator, Instant, OutputDriver, Rgb, SamplerConfig, SharedState, TaskProfile,
    WaveAnimator,
    config::{
        ADC_MAX, ANIMATOR_TASK, DETECTOR_TASK, NUM_CHANNELS, NUM_LEDS, POOL_CAPACITY,
        SAMPLER_TASK, SENSOR_PINS, SPEED_PIN, THRESHOLD_PINS,
    },
};

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 6.0;

/// Gap between LEDs
const LED_GAP: f32 = 1.0;

/// How long a pad strike keeps the piezo above the noise floor
const STRIKE_MS: u64 = 15;

/// Peak piezo reading of a strike
const STRIKE_LEVEL: u16 = 1800;

/// Noise floor amplitude of an idle piezo
const NOISE_LEVEL: u16 = 30;

static STATE: SharedState<NUM_CHANNELS, POOL_CAPACITY> = SharedState::new();

/// Simulated analog inputs shared between UI and loops
struct Board {
    started: StdInstant,
    knobs: [AtomicU16; 1 + NUM_CHANNELS],
    strike_until: [AtomicU64; NUM_CHANNELS],
    autoplay: AtomicBool,
}

impl Board {
    fn new() -> Self {
        Self {
            started: StdInstant::now(),
            knobs: [const { AtomicU16::new(400) }; 1 + NUM_CHANNELS],
            strike_until: [const { AtomicU64::new(0) }; NUM_CHANNELS],
            autoplay: AtomicBool::new(false),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn strike(&self, drum: usize) {
        let until = self.elapsed_ms() + STRIKE_MS;
        self.strike_until[drum].store(until, Ordering::Relaxed);
    }

    fn knob_index(pin: u8) -> Option<usize> {
        if pin == SPEED_PIN {
            return Some(0);
        }
        THRESHOLD_PINS.iter().position(|p| *p == pin).map(|i| i + 1)
    }
}

/// One ADC handle per loop, each with its own noise generator
struct BoardInput {
    board: Arc<Board>,
    seed: u32,
}

impl BoardInput {
    fn new(board: &Arc<Board>, seed: u32) -> Self {
        Self {
            board: Arc::clone(board),
            seed,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn noise(&mut self) -> u16 {
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        ((self.seed >> 16) as u16) % NOISE_LEVEL
    }
}

impl AnalogInput for BoardInput {
    fn read(&mut self, pin: u8) -> u16 {
        if let Some(knob) = Board::knob_index(pin) {
            return self.board.knobs[knob].load(Ordering::Relaxed);
        }
        let noise = self.noise();
        let Some(drum) = SENSOR_PINS.iter().position(|p| *p == pin) else {
            return noise;
        };
        let now = self.board.elapsed_ms();
        if now < self.board.strike_until[drum].load(Ordering::Relaxed) {
            STRIKE_LEVEL + noise
        } else {
            noise
        }
    }
}

/// Driver that publishes frames to the UI
struct SharedFrame(Arc<Mutex<Vec<Rgb>>>);

impl OutputDriver for SharedFrame {
    fn write(&mut self, colors: &[Rgb]) {
        if let Ok(mut frame) = self.0.lock() {
            frame.clear();
            frame.extend_from_slice(colors);
        }
    }
}

fn sleep(duration: Duration) {
    thread::sleep(std::time::Duration::from_micros(duration.as_micros()));
}

/// Start a loop on a named thread
///
/// Desktop threads have no priorities or core pinning, only the name is used.
fn spawn_task(profile: TaskProfile, task: impl FnOnce() + Send + 'static) {
    thread::Builder::new()
        .name(profile.name.into())
        .spawn(task)
        .expect("failed to spawn loop thread");
}

fn spawn_loops(board: &Arc<Board>, frame: &Arc<Mutex<Vec<Rgb>>>) {
    let mut input = BoardInput::new(board, 0x1234_5678);
    let autoplay_board = Arc::clone(board);
    spawn_task(DETECTOR_TASK, move || {
        let mut detector = HitDetector::new(
            &STATE.tunables,
            &STATE.pool,
            SENSOR_PINS,
            DetectorConfig::default(),
        );
        let mut simulator = HitSimulator::new(ChannelId(0));
        loop {
            let now = Instant::now();
            if autoplay_board.autoplay.load(Ordering::Relaxed) {
                simulator.tick(now, &STATE.pool);
            }
            sleep(detector.tick(now, &mut input));
        }
    });

    let mut input = BoardInput::new(board, 0x8765_4321);
    spawn_task(SAMPLER_TASK, move || {
        let mut sampler = ConfigSampler::new(&STATE.tunables, SamplerConfig::default());
        loop {
            sleep(sampler.tick(&mut input));
        }
    });

    let driver = SharedFrame(Arc::clone(frame));
    spawn_task(ANIMATOR_TASK, move || {
        let mut animator = WaveAnimator::<_, NUM_LEDS, NUM_CHANNELS, POOL_CAPACITY>::new(
            &STATE.pool,
            &STATE.tunables,
            driver,
        );
        loop {
            let result = animator.tick(Instant::now());
            sleep(result.sleep_duration);
        }
    });
}

fn main() -> eframe::Result<()> {
    let board = Arc::new(Board::new());
    let frame = Arc::new(Mutex::new(vec![Rgb::default(); NUM_LEDS]));
    spawn_loops(&board, &frame);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 400.0])
            .with_title("Drum Waves Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-drum-waves-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp { board, frame }))),
    )
}

struct PreviewApp {
    board: Arc<Board>,
    frame: Arc<Mutex<Vec<Rgb>>>,
}

impl PreviewApp {
    fn knob(&self, ui: &mut egui::Ui, label: &str, index: usize) {
        let mut value = self.board.knobs[index].load(Ordering::Relaxed);
        ui.horizontal(|ui| {
            ui.label(label);
            if ui.add(egui::Slider::new(&mut value, 0..=ADC_MAX)).changed() {
                self.board.knobs[index].store(value, Ordering::Relaxed);
            }
        });
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame = self
            .frame
            .lock()
            .map(|frame| frame.clone())
            .unwrap_or_default();
        let stats = STATE.pool.stats();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <Pads>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        for drum in 0..NUM_CHANNELS {
                            if ui.button(format!("🥁 Drum {drum}")).clicked() {
                                self.board.strike(drum);
                            }
                        }
                    });

                    ui.add_space(4.0);

                    let mut autoplay = self.board.autoplay.load(Ordering::Relaxed);
                    if ui.checkbox(&mut autoplay, "Simulated hits").changed() {
                        self.board.autoplay.store(autoplay, Ordering::Relaxed);
                    }
                });
                // </Pads>
                ui.add_space(16.0);
                // <Knobs>
                ui.vertical(|ui| {
                    self.knob(ui, "Speed:", 0);
                    for drum in 0..NUM_CHANNELS {
                        self.knob(ui, &format!("Threshold {drum}:"), drum + 1);
                    }
                });
                // </Knobs>
                ui.add_space(16.0);
                // <Stats>
                ui.vertical(|ui| {
                    ui.label(format!("Speed: {}", STATE.tunables.speed()));
                    ui.label(format!("Active waves: {}", STATE.pool.active_count()));
                    ui.label(format!(
                        "Spawned: {}  Duplicates: {}  Dropped: {}",
                        stats.spawned, stats.duplicates, stats.dropped
                    ));
                });
                // </Stats>
            });

            ui.add_space(16.0);

            // === LED Display ===
            let available_width = ui.available_width();
            let led_pitch = LED_SIZE + LED_GAP;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
            let rows = frame.len().div_ceil(leds_per_row);
            #[allow(clippy::cast_precision_loss)]
            let height = rows as f32 * led_pitch;

            let (response, painter) = ui.allocate_painter(
                egui::vec2(available_width, height),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in frame.iter().enumerate() {
                let row = i / leds_per_row;
                let col = i % leds_per_row;
                let x = origin.x + col as f32 * led_pitch;
                let y = origin.y + row as f32 * led_pitch;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 1.0, color);
            }
        });
    }
}
