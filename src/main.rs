// Webcam hand drawing.
// • Point (index finger leading): draw onto the canvas.
// • Peace sign: pick the palette color under the fingertip.
// • Open hand: erase around the fingertip.
// • Reaching into the top strip always picks a color. Q or ESC quits.

mod camera;
mod canvas;
mod config;
mod draw;
mod error;
mod gesture;
mod hand;
mod router;
mod tracker;
mod types;
mod vision;

use std::time::{Duration, Instant};

use camera::CameraCapture;
use canvas::Canvas;
use config::Config;
use draw::Drawer;
use error::Error;
use gesture::Gesture;
use hand::LandmarkSource;
use router::{HandInput, InputRouter};
use tracker::MediaPipeTracker;
use vision::GammaLut;

const INSTRUCTIONS: &str = "POINT: DRAW | PEACE: COLOR | OPEN: ERASE | Q: QUIT";

fn main() -> Result<(), Error> {
    env_logger::init();

    let cfg = Config::default();

    /* --- Camera first: everything else is sized to what it grants --- */
    let mut cam = CameraCapture::open(&cfg)?;
    let (w, h) = cam.resolution();
    let cfg = Config {
        width: w as usize,
        height: h as usize,
        ..cfg
    };

    let mut drawer = Drawer::new("Hand Drawing", cfg.width, cfg.height)?;
    let mut tracker = MediaPipeTracker::spawn(&cfg.detector_script, cfg.min_confidence)?;

    /* --- Drawing state: one canvas, one router, for the whole run --- */
    let mut canvas = Canvas::new(&cfg);
    let mut router = InputRouter::new(cfg.strip_height);
    let lut = GammaLut::new();

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    while drawer.is_open() && !drawer.quit_pressed() {
        // 1) Fresh frame, mirrored so the window behaves like a mirror.
        //    Detection runs on the mirrored frame, so hand coordinates
        //    and canvas coordinates agree.
        let mut frame = cam.next_frame()?;
        vision::mirror_horizontal(&mut frame);

        // 2) Find the hand and classify what it is doing.
        let hand = tracker.detect(&frame)?;
        let gesture = gesture::classify(hand.as_ref());
        let input = hand.as_ref().map(|hd| HandInput {
            gesture,
            cursor: hd.cursor(cfg.width, cfg.height),
        });

        // 3) One canvas operation per frame.
        router.route(&mut canvas, input);

        // 4) Compose the output: live feed, ink, palette strip.
        vision::composite(&mut frame, canvas.buffer(), canvas.strip(), &lut)?;

        // 5) Overlays: skeleton + crosshair at the cursor, then HUD.
        if let Some(hd) = &hand {
            draw::draw_hand(&mut frame, hd);
            let (cx, cy) = hd.cursor(cfg.width, cfg.height);
            draw::draw_crosshair(&mut frame, cx, cy, 12, 0x00_FF_CC_33);
        }

        let mode = if router.drawing() {
            "DRAW"
        } else {
            match gesture {
                Gesture::PeaceSign => "COLOR",
                Gesture::OpenHand => "ERASE",
                _ => "IDLE",
            }
        };
        let hud = format!(
            "{mode} | {} | {hud_fps_text}",
            canvas.current_color_name().to_uppercase()
        );
        let hud_y = cfg.strip_height as i32;
        draw::draw_text_5x7(&mut frame, 8, hud_y + 8, &hud, 0x00_FF_FF_FF);
        draw::draw_text_5x7(&mut frame, 8, hud_y + 20, INSTRUCTIONS, 0x00_FF_FF_FF);

        // 6) Present to the window.
        drawer.present(&frame)?;

        // 7) FPS bookkeeping, once per second.
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    log::info!("shutting down");
    Ok(())
}
