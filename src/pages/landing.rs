use yew::prelude::*;

use crate::config::LandingConfig;
use crate::landing::mount;
use crate::landing::registry::ids;

const BENEFITS: [(&str, &str); 3] = [
    ("Amaliy darslar", "Har bir mavzu real loyihalar ustida ko'rsatiladi."),
    ("Yopiq hamjamiyat", "Savollaringizga mentorlar va ishtirokchilar javob beradi."),
    ("Bepul materiallar", "Ro'yxatdan o'tganlarga qo'llanma va shablonlar yuboriladi."),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    let config = LandingConfig::default();
    let [hours, minutes, seconds] = [
        config.countdown.hours,
        config.countdown.minutes,
        config.countdown.seconds,
    ]
    .map(|v| format!("{:02}", v));

    // Behaviour attaches to the markup once, after the first render, and
    // detaches on unmount
    {
        let config = config.clone();
        use_effect_with_deps(
            move |_| {
                let mounted = mount::init(config);
                move || {
                    drop(mounted);
                }
            },
            (),
        );
    }

    html! {
        <div class="landing">
            <style>
                {r#"
                    .landing {
                        min-height: 100vh;
                        background: #0f0f14;
                        color: #fff;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                        padding: 2rem 1rem 4rem;
                    }
                    .hero {
                        max-width: 560px;
                        margin: 0 auto;
                        text-align: center;
                    }
                    .hero h1 {
                        font-size: 2rem;
                        line-height: 1.2;
                        margin-bottom: 1rem;
                        background: linear-gradient(45deg, #fff, #7EB2FF);
                        -webkit-background-clip: text;
                        -webkit-text-fill-color: transparent;
                    }
                    .countdown {
                        display: flex;
                        justify-content: center;
                        gap: 0.75rem;
                        margin: 2rem 0;
                    }
                    .countdown-box {
                        background: rgba(30, 144, 255, 0.1);
                        border: 1px solid rgba(30, 144, 255, 0.2);
                        border-radius: 12px;
                        padding: 0.75rem 1rem;
                        min-width: 64px;
                    }
                    .countdown-box span {
                        display: block;
                        font-size: 1.75rem;
                        font-weight: bold;
                    }
                    .countdown-box small {
                        color: rgba(255, 255, 255, 0.6);
                    }
                    .cta-btn, .submit-btn, .telegram-btn {
                        display: inline-block;
                        width: 100%;
                        max-width: 360px;
                        padding: 1rem;
                        border: none;
                        border-radius: 12px;
                        background: #1E90FF;
                        color: #fff;
                        font-size: 1.1rem;
                        text-decoration: none;
                        cursor: pointer;
                    }
                    .benefits {
                        max-width: 560px;
                        margin: 3rem auto 0;
                        display: grid;
                        gap: 1rem;
                    }
                    .benefit {
                        background: rgba(30, 30, 30, 0.7);
                        border-radius: 16px;
                        padding: 1.25rem;
                    }
                    @keyframes fadeIn {
                        from { opacity: 0; }
                        to { opacity: 1; }
                    }
                    @keyframes fadeInUp {
                        from { opacity: 0; transform: translateY(24px); }
                        to { opacity: 1; transform: translateY(0); }
                    }
                    .fade-in {
                        animation: fadeIn 0.8s ease-out both;
                    }
                    .fade-in-up {
                        animation: fadeInUp 0.8s ease-out both;
                    }
                    .modal {
                        position: fixed;
                        inset: 0;
                        display: none;
                        align-items: center;
                        justify-content: center;
                        z-index: 100;
                    }
                    .modal.active {
                        display: flex;
                    }
                    .modal-backdrop {
                        position: absolute;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.7);
                    }
                    .modal-content {
                        position: relative;
                        width: calc(100% - 2rem);
                        max-width: 420px;
                        background: #1a1a1a;
                        border-radius: 16px;
                        padding: 2rem 1.5rem;
                    }
                    .modal-close {
                        position: absolute;
                        top: 0.75rem;
                        right: 0.75rem;
                        background: none;
                        border: none;
                        color: #fff;
                        font-size: 1.5rem;
                        cursor: pointer;
                    }
                    .lead-form input {
                        width: 100%;
                        box-sizing: border-box;
                        padding: 0.9rem;
                        margin-bottom: 1rem;
                        border-radius: 10px;
                        border: 1px solid rgba(255, 255, 255, 0.2);
                        background: #111;
                        color: #fff;
                        font-size: 1rem;
                    }
                    .lead-form input.error {
                        border-color: #ff4d4f;
                    }
                    .submit-btn.loading {
                        opacity: 0.6;
                        pointer-events: none;
                    }
                "#}
            </style>

            <section class="hero">
                <h1 class="fade-in">{"Bepul vebinarga joyingizni band qiling"}</h1>
                <p class="fade-in-up">{"Ro'yxatdan o'tish uchun vaqt cheklangan"}</p>
                <div class="countdown">
                    <div class="countdown-box"><span id={ids::HOURS}>{hours}</span><small>{"soat"}</small></div>
                    <div class="countdown-box"><span id={ids::MINUTES}>{minutes}</span><small>{"daqiqa"}</small></div>
                    <div class="countdown-box"><span id={ids::SECONDS}>{seconds}</span><small>{"soniya"}</small></div>
                </div>
                <a href="#" id={ids::OPEN_FORM_BTN} class="cta-btn">{"Ro'yxatdan o'tish"}</a>
            </section>

            <section class="benefits">
                { for BENEFITS.iter().map(|(title, text)| html! {
                    <div class="benefit fade-in-up">
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </div>
                }) }
            </section>

            <div id={ids::FORM_MODAL} class="modal">
                <div class="modal-backdrop"></div>
                <div class="modal-content">
                    <button type="button" id={ids::CLOSE_FORM_MODAL} class="modal-close">{"×"}</button>
                    <h2>{"Ma'lumotlaringizni qoldiring"}</h2>
                    <form id={ids::LEAD_FORM} class="lead-form" novalidate={true}>
                        <input id={ids::USER_NAME} type="text" placeholder="Ismingiz" autocomplete="name" />
                        <input id={ids::USER_PHONE} type="tel" placeholder={config.phone.prefix.clone()} autocomplete="tel" />
                        <button type="submit" id={ids::SUBMIT_BTN} class="submit-btn">{"Yuborish"}</button>
                    </form>
                </div>
            </div>

            <div id={ids::SUCCESS_MODAL} class="modal">
                <div class="modal-backdrop"></div>
                <div class="modal-content">
                    <h2>{"Rahmat!"}</h2>
                    <p>{"Arizangiz qabul qilindi. Yangiliklarni Telegram kanalimizda kuzatib boring."}</p>
                    <a id={ids::TELEGRAM_BTN} class="telegram-btn" target="_blank" rel="noopener">{"Telegram kanalga o'tish"}</a>
                </div>
            </div>
        </div>
    }
}
