use eframe::egui::Context;

use super::super::ViewModel;

const FPS_SAMPLE_WINDOW: usize = 120;

impl ViewModel {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        if dt <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / dt).clamp(0.0, 1000.0);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > FPS_SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        if self.fps_samples.is_empty() {
            return None;
        }
        let average = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
        Some(format!(
            "FPS {:.0} | avg {:.1} | {:.1} ms",
            self.fps_current,
            average,
            1000.0 / self.fps_current.max(f32::EPSILON)
        ))
    }

    pub(in crate::app) fn simulation_status_text(&self) -> String {
        let Some(simulation) = self.simulation.as_ref() else {
            return "no graph".to_owned();
        };
        let state = if simulation.nodes().is_empty() {
            "idle (empty)"
        } else if self.drag.is_dragging() {
            "dragging"
        } else if !self.live_physics {
            "paused"
        } else if simulation.is_active() {
            "running"
        } else {
            "settled"
        };
        format!(
            "{state} | alpha {:.3} | tick {}",
            simulation.alpha(),
            simulation.ticks()
        )
    }
}
