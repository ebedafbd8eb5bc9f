use super::*;
use crate::select::test_support::{many, one, text, Answer, MemoryFs, ScriptedPrompter};

fn project() -> MemoryFs {
    MemoryFs::new()
        .file("/ws/Dockerfile")
        .file("/ws/frontend/Dockerfile")
        .file("/ws/frontend/Dockerfile.dockerignore")
        .file("/ws/backend/my.dockerfile")
}

#[test]
fn discovered_dockerfiles_are_offered_with_fixed_options() {
    let fs = project();
    let prompt = ScriptedPrompter::new(vec![one("frontend/Dockerfile")]);
    let base = Selector::new(&prompt);
    let choice = LocalFileSelector::new(&base, &fs)
        .dockerfile("Which Dockerfile?", "", Path::new("/ws"))
        .expect("dockerfile");
    assert_eq!(choice, DockerfileChoice::Path("frontend/Dockerfile".to_string()));
    assert_eq!(
        prompt.calls()[0].options,
        vec![
            "./Dockerfile",
            "backend/my.dockerfile",
            "frontend/Dockerfile",
            DOCKERFILE_CUSTOM_OPTION,
            DOCKERFILE_IMAGE_OPTION,
        ]
    );
}

#[test]
fn single_dockerfile_still_prompts_for_the_fallbacks() {
    let fs = MemoryFs::new().file("/ws/Dockerfile");
    let prompt = ScriptedPrompter::new(vec![one(DOCKERFILE_IMAGE_OPTION)]);
    let base = Selector::new(&prompt);
    let choice = LocalFileSelector::new(&base, &fs)
        .dockerfile("Which Dockerfile?", "", Path::new("/ws"))
        .expect("dockerfile");
    assert_eq!(choice, DockerfileChoice::Image);
    assert_eq!(prompt.call_count(), 1);
}

#[test]
fn custom_option_asks_for_a_path() {
    let fs = project();
    let prompt = ScriptedPrompter::new(vec![
        one(DOCKERFILE_CUSTOM_OPTION),
        text("build/Dockerfile.prod"),
    ]);
    let base = Selector::new(&prompt);
    let choice = LocalFileSelector::new(&base, &fs)
        .dockerfile("Which Dockerfile?", "", Path::new("/ws"))
        .expect("dockerfile");
    assert_eq!(choice, DockerfileChoice::Path("build/Dockerfile.prod".to_string()));
    assert_eq!(prompt.calls()[1].method, "get_text");
}

#[test]
fn no_dockerfiles_falls_back_to_text_input() {
    let fs = MemoryFs::new().file("/ws/README.md");
    let prompt = ScriptedPrompter::new(vec![text("docker/Dockerfile")]);
    let base = Selector::new(&prompt);
    let choice = LocalFileSelector::new(&base, &fs)
        .dockerfile("Which Dockerfile?", "", Path::new("/ws"))
        .expect("dockerfile");
    assert_eq!(choice, DockerfileChoice::Path("docker/Dockerfile".to_string()));
    let calls = prompt.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "get_text");
}

#[test]
fn empty_custom_path_is_rejected() {
    let fs = MemoryFs::new().dir("/ws");
    let prompt = ScriptedPrompter::new(vec![text("  ")]);
    let base = Selector::new(&prompt);
    let err = LocalFileSelector::new(&base, &fs)
        .dockerfile("Which Dockerfile?", "", Path::new("/ws"))
        .expect_err("empty path");
    assert_eq!(
        err.to_string(),
        "get custom Dockerfile path: path must not be empty"
    );
}

#[test]
fn static_sources_combine_discovered_and_custom_paths() {
    let fs = MemoryFs::new()
        .file("/ws/index.html")
        .file("/ws/assets/logo.png")
        .file("/ws/.git/HEAD")
        .file("/ws/berth/.workspace");
    let prompt = ScriptedPrompter::new(vec![
        many(&["assets", STATIC_SOURCE_CUSTOM_OPTION]),
        text("../shared/fonts"),
        text("assets"),
        text(""),
    ]);
    let base = Selector::new(&prompt);
    let walk = StaticSourceWalk::new("/ws", "/ws/berth");
    let sources = LocalFileSelector::new(&base, &fs)
        .static_sources("Which files?", "", &walk)
        .expect("sources");
    assert_eq!(sources, vec!["assets", "../shared/fonts"]);
    assert_eq!(
        prompt.calls()[0].options,
        vec![
            "assets",
            "assets/logo.png",
            "index.html",
            STATIC_SOURCE_CUSTOM_OPTION,
        ]
    );
}

#[test]
fn static_sources_without_candidates_go_straight_to_text_input() {
    let fs = MemoryFs::new().dir("/ws");
    let prompt = ScriptedPrompter::new(vec![text("dist"), text("")]);
    let base = Selector::new(&prompt);
    let walk = StaticSourceWalk::new("/ws", "/ws/berth");
    let sources = LocalFileSelector::new(&base, &fs)
        .static_sources("Which files?", "", &walk)
        .expect("sources");
    assert_eq!(sources, vec!["dist"]);
}

#[test]
fn interrupted_static_source_prompt_is_wrapped() {
    let fs = MemoryFs::new().file("/ws/index.html");
    let prompt = ScriptedPrompter::new(vec![Answer::Fail("interrupted".to_string())]);
    let base = Selector::new(&prompt);
    let walk = StaticSourceWalk::new("/ws", "/ws/berth");
    let err = LocalFileSelector::new(&base, &fs)
        .static_sources("Which files?", "", &walk)
        .expect_err("interrupted");
    assert_eq!(err.to_string(), "select static sources: interrupted");
}
