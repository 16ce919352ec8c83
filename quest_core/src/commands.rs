use serde::Serialize;
use thiserror::Error;

use crate::{
    market::PurchaseStatus,
    plot_effect::{CombineMode, EffectOverlay},
    resource_group::ProductionGroup,
    session::{GameSession, RevertOutOfOrder},
    shop::{CustomisationChoice, RoboticonShop},
};

/// Actions a front-end or script can perform against a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    IncreaseQuantity,
    DecreaseQuantity,
    PurchaseRoboticons,
    SelectNext,
    SelectPrevious,
    ChooseCustomisation(CustomisationChoice),
    PurchaseCustomisation,
    ExitShop,
    Impose {
        effect: String,
        x: u32,
        y: u32,
        mode: Option<CombineMode>,
    },
    Bind {
        effect: String,
        x: u32,
        y: u32,
    },
    Trigger {
        effect: String,
    },
    Revert {
        effect: String,
    },
    RevertAll,
    Install {
        x: u32,
        y: u32,
    },
    State,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    ShopUpdated,
    Purchase { status: PurchaseStatus },
    Imposed { applied: ProductionGroup },
    Triggered { overlay: EffectOverlay },
    Reverted { count: usize },
    Installed { success: bool },
    State,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),
    #[error("no plot at ({x}, {y})")]
    UnknownPlot { x: u32, y: u32 },
    #[error(transparent)]
    RevertOutOfOrder(#[from] RevertOutOfOrder),
}

/// Applies one command to the session and its shop controller.
pub fn execute_command<T: Clone>(
    session: &mut GameSession,
    shop: &mut RoboticonShop<T>,
    command: SessionCommand,
) -> Result<CommandOutcome, CommandError> {
    tracing::trace!(target: "roboticon_quest::commands", ?command, "command.execute");

    let outcome = match command {
        SessionCommand::IncreaseQuantity => {
            shop.increase_quantity(&*session);
            CommandOutcome::ShopUpdated
        }
        SessionCommand::DecreaseQuantity => {
            shop.decrease_quantity(&*session);
            CommandOutcome::ShopUpdated
        }
        SessionCommand::PurchaseRoboticons => CommandOutcome::Purchase {
            status: shop.purchase_roboticons(session),
        },
        SessionCommand::SelectNext => {
            shop.select_next(&*session);
            CommandOutcome::ShopUpdated
        }
        SessionCommand::SelectPrevious => {
            shop.select_previous(&*session);
            CommandOutcome::ShopUpdated
        }
        SessionCommand::ChooseCustomisation(choice) => {
            shop.select_customisation(choice);
            CommandOutcome::ShopUpdated
        }
        SessionCommand::PurchaseCustomisation => CommandOutcome::Purchase {
            status: shop.purchase_customisation(session),
        },
        SessionCommand::ExitShop => {
            shop.exit(session);
            CommandOutcome::ShopUpdated
        }
        SessionCommand::Impose { effect, x, y, mode } => {
            let plot = session
                .plot_at(x, y)
                .ok_or(CommandError::UnknownPlot { x, y })?;
            let applied = session
                .impose_effect(&effect, plot, mode)
                .ok_or(CommandError::UnknownEffect(effect))?;
            CommandOutcome::Imposed { applied }
        }
        SessionCommand::Bind { effect, x, y } => {
            let plot = session
                .plot_at(x, y)
                .ok_or(CommandError::UnknownPlot { x, y })?;
            if !session.bind_effect(&effect, plot) {
                return Err(CommandError::UnknownEffect(effect));
            }
            CommandOutcome::ShopUpdated
        }
        SessionCommand::Trigger { effect } => {
            let overlay = session
                .trigger_effect(&effect)
                .ok_or(CommandError::UnknownEffect(effect))?;
            CommandOutcome::Triggered { overlay }
        }
        SessionCommand::Revert { effect } => {
            if session.effect(&effect).is_none() {
                return Err(CommandError::UnknownEffect(effect));
            }
            let count = usize::from(session.revert_effect(&effect)?.is_some());
            CommandOutcome::Reverted { count }
        }
        SessionCommand::RevertAll => CommandOutcome::Reverted {
            count: session.revert_all_effects(),
        },
        SessionCommand::Install { x, y } => {
            let plot = session
                .plot_at(x, y)
                .ok_or(CommandError::UnknownPlot { x, y })?;
            let success = match shop.selected_roboticon().map(|robot| robot.id) {
                Some(id) => session.install_roboticon(id, plot),
                None => false,
            };
            if success {
                shop.refresh_inventory(&*session);
            }
            CommandOutcome::Installed { success }
        }
        SessionCommand::State => CommandOutcome::State,
    };

    Ok(outcome)
}
