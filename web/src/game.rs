use crate::scheduler::TimeoutScheduler;
use crate::utils::js_random_seed;
use arcade_core as game;
use game::{ArcadeConfig, CellFrame, ErrorKind, GameKind, GameSession, Input, TimerToken};
use web_sys::HtmlInputElement;
use web_time::Instant;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Input(Input),
    Cell(u8),
    Draft(String),
    SubmitDraft,
    TimerFired(TimerToken),
}

/// Last message shown under the board.
#[derive(Clone, Debug, PartialEq)]
struct Notice {
    text: String,
    tone: &'static str,
}

impl Notice {
    fn from_error(err: game::GameError) -> Self {
        let tone = match err.kind() {
            ErrorKind::InvalidInput => "invalid",
            ErrorKind::IllegalMove => "illegal",
            ErrorKind::PrematureAction => "premature",
            ErrorKind::NoOp => "ignored",
        };
        Self {
            text: err.to_string(),
            tone,
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: u8,
    cell: CellFrame,
    callback: Callback<Msg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        cell,
        callback,
    } = props.clone();

    let enabled = cell.is_enabled();
    let class = classes!("cell", cell.style.class_names().collect::<Vec<_>>());
    let style = cell.swatch.map(|color| format!("background-color: {}", color));

    let onclick = Callback::from(move |_: MouseEvent| {
        if enabled {
            log::trace!("cell {} click", index);
            callback.emit(Msg::Cell(index));
        }
    });

    html! {
        <td {class} {style} {onclick}>{cell.label}</td>
    }
}

/// What the primary button and the Enter key do.
fn primary_msg(has_text_entry: bool) -> Msg {
    if has_text_entry {
        Msg::SubmitDraft
    } else {
        Msg::Input(Input::Confirm)
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub kind: GameKind,
    pub config: ArcadeConfig,
    /// Forces a seeded source instead of browser entropy
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: GameSession,
    scheduler: TimeoutScheduler,
    draft: String,
    notice: Option<Notice>,
}

impl GameView {
    fn new_session(props: &GameProps) -> GameSession {
        match props.seed {
            Some(seed) => GameSession::seeded(props.kind, &props.config, seed),
            None => GameSession::new(
                props.kind,
                &props.config,
                game::RandomSource::system(js_random_seed()),
            ),
        }
    }

    fn apply(&mut self, input: Input) -> bool {
        let now = Instant::now();
        self.notice = match self.session.handle_input(input, now, &mut self.scheduler) {
            Ok(feedback) => {
                let text = feedback.to_string();
                (!text.is_empty()).then_some(Notice { text, tone: "ok" })
            }
            Err(err) => {
                log::debug!("{:?} rejected input: {}", self.session.kind(), err);
                Some(Notice::from_error(err))
            }
        };
        true
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: Self::new_session(ctx.props()),
            scheduler: TimeoutScheduler::new(ctx.link().callback(Msg::TimerFired)),
            draft: String::new(),
            notice: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(input) => self.apply(input),
            Msg::Cell(index) => {
                let input = self.session.cell_input(index);
                self.apply(input)
            }
            Msg::Draft(draft) => {
                self.draft = draft;
                false
            }
            Msg::SubmitDraft => {
                let text = std::mem::take(&mut self.draft);
                self.apply(Input::Submit(text))
            }
            Msg::TimerFired(token) => {
                self.scheduler.forget(token);
                self.session.on_timer(token, Instant::now())
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let frame = self.session.render();
        let kind = self.session.kind();
        let status = format!("{:?}", self.session.status()).to_lowercase();
        let cell_callback = ctx.link().callback(|msg: Msg| msg);
        // Buttons already turn Enter into a click.
        let keep_key = Callback::from(|e: KeyboardEvent| e.stop_propagation());

        let enter_msg = primary_msg(frame.text_entry.is_some());
        let onkeydown = ctx.link().batch_callback(move |e: KeyboardEvent| {
            (e.key() == "Enter").then(|| {
                e.prevent_default();
                enter_msg.clone()
            })
        });

        let text_entry = frame.text_entry.map(|placeholder| {
            let oninput = ctx.link().callback(|e: InputEvent| {
                Msg::Draft(e.target_unchecked_into::<HtmlInputElement>().value())
            });
            let onkeydown = ctx.link().batch_callback(|e: KeyboardEvent| {
                e.stop_propagation();
                (e.key() == "Enter").then(|| {
                    e.prevent_default();
                    Msg::SubmitDraft
                })
            });
            html! {
                <input type="text" inputmode="numeric" {placeholder} value={self.draft.clone()} {oninput} {onkeydown}/>
            }
        });

        let primary = frame.primary.as_ref().map(|action| {
            let msg = primary_msg(frame.text_entry.is_some());
            let onclick = ctx.link().callback(move |_: MouseEvent| msg.clone());
            html! {
                <button type="button" class="primary" disabled={!action.enabled} {onclick} onkeydown={keep_key.clone()}>{action.label}</button>
            }
        });

        let reset_stats = (kind == GameKind::ColorPick).then(|| {
            let onclick = ctx
                .link()
                .callback(|_: MouseEvent| Msg::Input(Input::ResetStats));
            html! {
                <button type="button" class="secondary" {onclick} onkeydown={keep_key.clone()}>{"Reset stats"}</button>
            }
        });

        let notice = self.notice.as_ref().map(|notice| {
            html! { <p class={classes!("notice", notice.tone)}>{notice.text.clone()}</p> }
        });

        html! {
            <section class={classes!("arcade", frame.mount_id(), status)} tabindex="0" {onkeydown}>
                <h3>{kind.title()}</h3>
                <p class="headline">{frame.headline.clone()}</p>
                {for frame.detail.clone().map(|detail| html! { <p class="detail">{detail}</p> })}
                if !frame.cells.is_empty() {
                    <table class={classes!("grid", format!("cols-{}", frame.columns))}>
                        {
                            for frame.rows().enumerate().map(|(row, cells)| html! {
                                <tr>
                                    {
                                        for cells.iter().enumerate().map(|(col, cell)| {
                                            let index = (row * usize::from(frame.columns) + col) as u8;
                                            let callback = cell_callback.clone();
                                            html! {
                                                <CellView {index} cell={cell.clone()} {callback}/>
                                            }
                                        })
                                    }
                                </tr>
                            })
                        }
                    </table>
                }
                <form onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                    {for text_entry}
                    {for primary}
                    {for reset_stats}
                </form>
                {for notice}
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_tone_follows_error_kind() {
        let notice = Notice::from_error(game::GameError::FalseStart);
        assert_eq!(notice.tone, "premature");
        assert_eq!(notice.text, "Too soon! Wait for the signal");

        let notice = Notice::from_error(game::GameError::CellOccupied);
        assert_eq!(notice.tone, "illegal");
    }

    #[test]
    fn enter_follows_the_primary_action() {
        let props = GameProps {
            kind: GameKind::NumberGuess,
            config: ArcadeConfig::default(),
            seed: Some(1),
        };
        let session = GameView::new_session(&props);
        let frame = session.render();
        assert_eq!(primary_msg(frame.text_entry.is_some()), Msg::SubmitDraft);

        let session = GameView::new_session(&GameProps {
            kind: GameKind::Reaction,
            ..props
        });
        let frame = session.render();
        assert_eq!(
            primary_msg(frame.text_entry.is_some()),
            Msg::Input(Input::Confirm)
        );
    }

    #[test]
    fn seeded_props_build_reproducible_sessions() {
        let props = GameProps {
            kind: GameKind::Memory,
            config: ArcadeConfig::default(),
            seed: Some(5),
        };
        let (GameSession::Memory(a), GameSession::Memory(b)) =
            (GameView::new_session(&props), GameView::new_session(&props))
        else {
            unreachable!();
        };
        assert_eq!(a.cards(), b.cards());
    }
}
