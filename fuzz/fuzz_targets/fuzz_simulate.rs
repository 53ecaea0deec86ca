#![no_main]

use libfuzzer_sys::fuzz_target;
use nativecomp::model::{Argument, CommandOption, Node};
use nativecomp::shell::bash::{BashTables, simulate};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let root = Node::group("tool")
        .with_option(CommandOption::value(["-C"]))
        .with_option(CommandOption::count(["-v", "--verbose"]))
        .with_child(
            Node::leaf("sub")
                .with_option(CommandOption::value(["-F", "--format"]).with_choices(["json", "text"]))
                .with_argument(Argument::new("FILE").unbounded()),
        );
    let tables = BashTables::from_tree(&root, "tool");

    let mut words = vec!["tool"];
    words.extend(text.split(' '));
    for cword in 0..=words.len() {
        let _ = simulate(&tables, &words, cword);
    }
});
