use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode};
use quest_core::{
    execute_command, CommandOutcome, CustomisationChoice, GameSession, PurchaseStatus,
    RoboticonShop, SessionCommand,
};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use tracing::{info, warn};

use crate::ui::{draw_ui, terminal_art, Sprite, UiState};

pub struct InspectorApp {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    session: GameSession,
    shop: RoboticonShop<Sprite>,
    ui_state: UiState,
    log_receiver: Receiver<String>,
}

impl InspectorApp {
    pub fn new(session: GameSession, log_receiver: Receiver<String>) -> Result<Self> {
        let stdout = std::io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        crossterm::terminal::enable_raw_mode()?;
        terminal.clear()?;
        terminal.hide_cursor()?;

        let shop = RoboticonShop::new(&session, terminal_art());
        let grid = session.plot_grid().size();
        let ui_state = UiState::new((grid.x, grid.y), session.effects().len());

        Ok(Self {
            terminal,
            session,
            shop,
            ui_state,
            log_receiver,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let mut last_draw = Instant::now() - Duration::from_secs(1);

        loop {
            while let Ok(line) = self.log_receiver.try_recv() {
                self.ui_state.push_log(line);
            }

            if last_draw.elapsed() >= Duration::from_millis(100) {
                let customisation = self.shop.customisation();
                self.terminal.draw(|frame| {
                    draw_ui(
                        frame,
                        &self.ui_state,
                        &self.session,
                        self.shop.view(),
                        customisation,
                    )
                })?;
                last_draw = Instant::now();
            }

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };

            if self.ui_state.overlay.take().is_some() {
                last_draw = Instant::now() - Duration::from_secs(1);
                continue;
            }

            let command = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('+') | KeyCode::Char('=') => Some(SessionCommand::IncreaseQuantity),
                KeyCode::Char('-') | KeyCode::Char('_') => Some(SessionCommand::DecreaseQuantity),
                KeyCode::Enter => Some(SessionCommand::PurchaseRoboticons),
                KeyCode::Char('<') | KeyCode::Char(',') => Some(SessionCommand::SelectPrevious),
                KeyCode::Char('>') | KeyCode::Char('.') => Some(SessionCommand::SelectNext),
                KeyCode::Char(digit @ '1'..='3') => {
                    let index = digit as usize - '1' as usize;
                    CustomisationChoice::from_index(index).map(SessionCommand::ChooseCustomisation)
                }
                KeyCode::Char('c') => Some(SessionCommand::PurchaseCustomisation),
                KeyCode::Char('x') => Some(SessionCommand::ExitShop),
                KeyCode::Char('p') => {
                    let (x, y) = self.ui_state.cursor;
                    Some(SessionCommand::Install { x, y })
                }
                KeyCode::Left => {
                    self.ui_state.move_cursor(-1, 0);
                    None
                }
                KeyCode::Right => {
                    self.ui_state.move_cursor(1, 0);
                    None
                }
                KeyCode::Up => {
                    self.ui_state.move_cursor(0, -1);
                    None
                }
                KeyCode::Down => {
                    self.ui_state.move_cursor(0, 1);
                    None
                }
                KeyCode::Tab => {
                    self.ui_state.cycle_effect();
                    None
                }
                KeyCode::Char('i') => self.selected_effect().map(|effect| {
                    let (x, y) = self.ui_state.cursor;
                    SessionCommand::Impose {
                        effect,
                        x,
                        y,
                        mode: None,
                    }
                }),
                KeyCode::Char('t') => self.bind_selected_effect(),
                KeyCode::Char('u') => self
                    .selected_effect()
                    .map(|effect| SessionCommand::Revert { effect }),
                KeyCode::Char('r') => Some(SessionCommand::RevertAll),
                _ => None,
            };

            if let Some(command) = command {
                self.dispatch(command);
            }
            last_draw = Instant::now() - Duration::from_secs(1);
        }

        self.terminal.show_cursor()?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    fn selected_effect(&self) -> Option<String> {
        self.session
            .effects()
            .get(self.ui_state.selected_effect)
            .map(|effect| effect.name().to_string())
    }

    /// Points the selected effect at the cursor plot and returns the trigger command.
    fn bind_selected_effect(&mut self) -> Option<SessionCommand> {
        let effect = self.selected_effect()?;
        let (x, y) = self.ui_state.cursor;
        self.dispatch(SessionCommand::Bind {
            effect: effect.clone(),
            x,
            y,
        });
        Some(SessionCommand::Trigger { effect })
    }

    fn dispatch(&mut self, command: SessionCommand) {
        match execute_command(&mut self.session, &mut self.shop, command) {
            Ok(CommandOutcome::Purchase {
                status: PurchaseStatus::Failure,
            }) => {
                self.ui_state.push_log("Purchase declined");
            }
            Ok(CommandOutcome::Purchase {
                status: PurchaseStatus::Success,
            }) => {
                self.ui_state.push_log("Purchase complete");
            }
            Ok(CommandOutcome::Imposed { applied }) => {
                self.ui_state.push_log(format!("Effect imposed: {}", applied));
            }
            Ok(CommandOutcome::Triggered { overlay }) => {
                info!(effect = %overlay.title, "overlay.shown");
                self.ui_state.overlay = Some(overlay);
            }
            Ok(CommandOutcome::Reverted { count }) => {
                self.ui_state
                    .push_log(format!("Reverted {} effect application(s)", count));
            }
            Ok(CommandOutcome::Installed { success }) => {
                if success {
                    self.ui_state.push_log("Roboticon installed");
                } else {
                    self.ui_state.push_log("Nothing to install");
                }
            }
            Ok(CommandOutcome::ShopUpdated | CommandOutcome::State) => {}
            Err(err) => {
                warn!("Command rejected: {}", err);
            }
        }
    }
}
