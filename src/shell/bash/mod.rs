//! Bash completion generator.
//!
//! The emitted script declares five associative arrays keyed by command
//! path (or `path flag`), fills them with one block of assignments per
//! visible command, and registers a completion function that re-parses
//! `COMP_WORDS` against those tables on every `TAB`.

pub mod simulate;
pub mod tables;

pub use simulate::{ParsedLine, Resolution, parse_line, simulate};
pub use tables::{BashTables, NodeTables};

use crate::error::GenerateError;
use crate::model::{CommandContext, Node};
use crate::shell::common::CompleterBase;
use crate::shell::{Completer, Shell};

/// Suffixes of the five global tables, in declaration order.
const TABLES: [&str; 5] = ["subcmds", "opts", "opt_nargs", "slamopts", "opt_choices"];

/// Runtime half of the script. `{slug}` and `{name}` are substituted.
const EPILOGUE_TEMPLATE: &str = r#"{slug}_parse_line() {
  local compword
  compword="${COMP_WORDS[$COMP_CWORD]}"

  local boundary
  boundary=$((COMP_CWORD - 1))

  local i=0 toskip=0 nomoreopts=0
  local curopt=""
  local curcmd="${COMP_WORDS[0]}"
  local curword opt subcmd
  local -a words
  while [ $i -lt $boundary ]; do
    _=$((i++))
    curword="${COMP_WORDS[$i]}"

    if [ "$curword" = "--" ]; then
      curopt=""
      toskip=0
      nomoreopts=1
      continue
    fi

    if [ $toskip -gt 0 ]; then
      _=$((toskip--))
      continue
    fi

    if [ $nomoreopts -eq 0 ] && [[ $curword == -* ]]; then
      # value attached to a short flag, e.g. -Fjson
      read -ra words <<< "${{slug}_slamopts["$curcmd"]}"
      for opt in "${words[@]}"; do
        if [[ "$curword" != "$opt" ]] && [[ "$curword" == "$opt"* ]]; then
          continue 2
        fi
      done

      curopt="$curword"
      toskip=${{slug}_opt_nargs["$curcmd $curword"]}
      [ -n "$toskip" ] || toskip=0
      continue
    fi

    read -ra words <<< "${{slug}_subcmds["$curcmd"]}"
    for subcmd in "${words[@]}"; do
      if [ "$curword" = "$subcmd" ]; then
        curcmd="$curcmd $curword"
        continue 2
      fi
    done

    break
  done

  if [ $toskip -eq 0 ]; then
    curopt=""
    read -ra words <<< "${{slug}_subcmds["$curcmd"]}"
    for subcmd in "${words[@]}"; do
      if [ "$compword" = "$subcmd" ]; then
        curcmd="$curcmd $compword"
        break
      fi
    done
  fi

  printf '%s\n' "$curcmd" "$curopt" "$toskip"
}

{slug}_add_match_to_compreply() {
  local choice
  local -a words
  read -ra words <<< "$1"
  for choice in "${words[@]}"; do
    if [[ "$choice" == "${COMP_WORDS[$COMP_CWORD]}"* ]]; then
      COMPREPLY+=("$choice")
    fi
  done
}

{slug}_add_match_for_cmdopt() {
  local choices="${{slug}_opt_choices["$1"]}"
  if [ -n "$choices" ]; then
    {slug}_add_match_to_compreply "$choices"
  fi
}

{slug}_bash() {
  COMPREPLY=()
  local curword="${COMP_WORDS[$COMP_CWORD]}"

  local parsed
  readarray -t parsed < <({slug}_parse_line)

  local curcmd="${parsed[0]}"
  local curopt="${parsed[1]}"
  local num_optargs="${parsed[2]}"

  case "$curword" in
    -*)
      {slug}_add_match_to_compreply "${{slug}_opts["$curcmd"]}"
      ;;
    "")
      if [ "$num_optargs" -gt 0 ]; then
        {slug}_add_match_for_cmdopt "$curcmd $curopt"
      else
        {slug}_add_match_to_compreply "${{slug}_subcmds["$curcmd"]}"
      fi
      ;;
    *)
      if [ -z "$curopt" ]; then
        {slug}_add_match_to_compreply "${{slug}_subcmds["$curcmd"]}"
      else
        {slug}_add_match_for_cmdopt "$curcmd $curopt"
      fi
      ;;
  esac
}

complete -F {slug}_bash {name}"#;

/// Generates bash completion scripts.
#[derive(Debug, Clone)]
pub struct BashCompleter<'a> {
    base: CompleterBase<'a>,
}

impl<'a> BashCompleter<'a> {
    /// Creates a bash completer for `root`, displayed as `name` if given.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingRootName`] when no display name can
    /// be resolved.
    pub fn new(root: &'a Node, name: Option<&str>) -> Result<Self, GenerateError> {
        Ok(Self {
            base: CompleterBase::new(root, name)?,
        })
    }

    /// Prefix of every emitted identifier.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.base.slug
    }

    /// The completion tables this script would load.
    #[must_use]
    pub fn tables(&self) -> BashTables {
        BashTables::from_tree(self.base.root, &self.base.name)
    }

    fn node_completer(&self, ctx: &CommandContext<'_>) -> Vec<String> {
        NodeTables::from_context(ctx).assignments(&self.base.slug)
    }
}

impl Completer for BashCompleter<'_> {
    fn shell(&self) -> Shell {
        Shell::Bash
    }

    fn root(&self) -> &Node {
        self.base.root
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn prologue(&self) -> String {
        TABLES
            .iter()
            .map(|table| format!("declare -A {}_{table}", self.base.slug))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn epilogue(&self) -> String {
        EPILOGUE_TEMPLATE
            .replace("{slug}", &self.base.slug)
            .replace("{name}", &self.base.name)
    }

    fn group_completer(&self, ctx: &CommandContext<'_>) -> Vec<String> {
        self.node_completer(ctx)
    }

    fn cmd_completer(&self, ctx: &CommandContext<'_>) -> Vec<String> {
        self.node_completer(ctx)
    }
}
