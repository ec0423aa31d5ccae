use std::rc::Rc;

use yew::prelude::*;

use crate::scramble::{ScrambleAnimator, ScrambleSettings};
use crate::timer::BrowserScheduler;

/// Keeps one animator per component. The component re-renders on every tick
/// and the animation is cancelled on unmount.
#[hook]
pub fn use_scramble(text: AttrValue, settings: ScrambleSettings) -> Rc<ScrambleAnimator> {
    let redraw = use_force_update();
    let animator = use_memo(
        move |_| ScrambleAnimator::new(&text, settings, BrowserScheduler::shared()),
        (),
    );

    {
        let animator = animator.clone();
        use_effect_with_deps(
            move |_| {
                animator.set_listener(Rc::new(move || redraw.force_update()));
                move || animator.stop()
            },
            (),
        );
    }

    animator
}

#[derive(Properties, PartialEq)]
pub struct ScrambleTextProps {
    pub text: AttrValue,
    pub active: bool,
}

/// Price tag that scrambles while `active` and shows the plain text otherwise.
#[function_component(ScrambleText)]
pub fn scramble_text(props: &ScrambleTextProps) -> Html {
    let animator = use_scramble(props.text.clone(), ScrambleSettings::price());

    {
        let animator = animator.clone();
        use_effect_with_deps(
            move |(active, text)| {
                animator.set_target(text);
                if *active {
                    animator.start();
                } else {
                    animator.stop();
                }
                move || animator.stop()
            },
            (props.active, props.text.clone()),
        );
    }

    html! { <span class="scramble-text">{animator.display()}</span> }
}
