//! The scope chain: frames, variable creation, and lookup.

use onda_ast::Span;

use crate::registry::{CallableId, ModuleId};
use crate::value::Value;

/// A variable binding.
#[derive(Debug)]
pub struct Association {
    pub name: String,
    pub value: Value,
}

/// One link of the scope chain. The engine is single-threaded, so the chain
/// is the stack of live frames: index 0 is the root, the last is innermost.
#[derive(Debug)]
pub struct Frame {
    pub module: ModuleId,
    pub callable: Option<CallableId>,
    /// Call site in the caller's module; drives traceback lines.
    pub call_site: Span,
    /// Callee name shown in tracebacks.
    pub label: Option<String>,
    /// Transparent frames pass global lookup through to their parent;
    /// opaque frames (function calls) end the walk.
    pub transparent: bool,
    variables: Vec<Association>,
}

/// The scope chain.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// A new environment containing only the root frame.
    pub fn new(module: ModuleId) -> Self {
        Self {
            frames: vec![Frame {
                module,
                callable: None,
                call_site: Span::new(0, 0),
                label: None,
                transparent: false,
                variables: Vec::new(),
            }],
        }
    }

    pub fn push_frame(
        &mut self,
        module: ModuleId,
        callable: Option<CallableId>,
        call_site: Span,
        label: Option<String>,
        transparent: bool,
    ) {
        self.frames.push(Frame {
            module,
            callable,
            call_site,
            label,
            transparent,
            variables: Vec::new(),
        });
    }

    /// Drop the innermost frame and every binding it owns. The root frame
    /// is never popped.
    pub fn pop_frame(&mut self) {
        debug_assert!(self.frames.len() > 1, "attempted to pop the root frame");
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Module of the innermost frame.
    pub fn current_module(&self) -> ModuleId {
        self.frames.last().expect("root frame always exists").module
    }

    /// Point the root frame at a module. Top-level runs execute directly in
    /// the root frame, so each run re-homes it to the module being run.
    pub fn set_root_module(&mut self, module: ModuleId) {
        self.frames[0].module = module;
    }

    /// Frames from root to innermost, for traceback capture.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Local lookup: the innermost frame only.
    pub fn get_local(&self, name: &str) -> Option<&Value> {
        let frame = self.frames.last().expect("root frame always exists");
        frame_lookup(frame, name)
    }

    /// Global lookup: walk outward from the innermost frame. Transparent
    /// frames pass the search through; the first opaque boundary ends the
    /// walk, after which the root frame is consulted last.
    pub fn get_global(&self, name: &str) -> Option<&Value> {
        for i in self.visible_frames() {
            if let Some(value) = frame_lookup(&self.frames[i], name) {
                return Some(value);
            }
        }
        None
    }

    /// Create-or-update in the innermost frame (plain assignment).
    pub fn set_local(&mut self, name: &str, value: Value) {
        let frame = self.frames.last_mut().expect("root frame always exists");
        match frame.variables.iter_mut().find(|a| a.name == name) {
            Some(assoc) => assoc.value = value,
            None => frame.variables.push(Association {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Update through global lookup; create at the root when absent
    /// (`global name = ..`).
    pub fn set_global(&mut self, name: &str, value: Value) {
        let target = self
            .visible_frames()
            .into_iter()
            .find(|&i| frame_lookup(&self.frames[i], name).is_some())
            .unwrap_or(0);
        let frame = &mut self.frames[target];
        match frame.variables.iter_mut().find(|a| a.name == name) {
            Some(assoc) => assoc.value = value,
            None => frame.variables.push(Association {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Frame indices visible to global lookup, innermost first.
    fn visible_frames(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut i = self.frames.len() - 1;
        loop {
            out.push(i);
            if i == 0 {
                return out;
            }
            if !self.frames[i].transparent {
                break;
            }
            i -= 1;
        }
        // An opaque boundary was crossed: only the root remains visible.
        out.push(0);
        out
    }
}

fn frame_lookup<'a>(frame: &'a Frame, name: &str) -> Option<&'a Value> {
    frame
        .variables
        .iter()
        .find(|a| a.name == name)
        .map(|a| &a.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment {
        Environment::new(ModuleId(0))
    }

    fn push_call(env: &mut Environment) {
        env.push_frame(ModuleId(0), None, Span::new(0, 0), None, false);
    }

    fn push_module(env: &mut Environment) {
        env.push_frame(ModuleId(1), None, Span::new(0, 0), None, true);
    }

    #[test]
    fn local_assignment_shadows_without_touching_the_outer_binding() {
        let mut env = env();
        env.set_local("x", Value::Int(1));
        push_call(&mut env);
        env.set_local("x", Value::Int(2));
        assert!(env.get_local("x").unwrap().is_equal(&Value::Int(2)));
        env.pop_frame();
        assert!(env.get_global("x").unwrap().is_equal(&Value::Int(1)));
    }

    #[test]
    fn function_frames_see_root_but_not_intermediate_callers() {
        let mut env = env();
        env.set_local("root_var", Value::Int(1));
        push_call(&mut env);
        env.set_local("caller_var", Value::Int(2));
        push_call(&mut env);
        assert!(env.get_global("root_var").is_some());
        assert!(env.get_global("caller_var").is_none());
    }

    #[test]
    fn transparent_frames_pass_lookup_through() {
        let mut env = env();
        env.set_local("root_var", Value::Int(1));
        push_call(&mut env);
        env.set_local("caller_var", Value::Int(2));
        push_module(&mut env);
        // A module evaluated from inside the call sees the caller's scope.
        assert!(env.get_global("caller_var").is_some());
        assert!(env.get_global("root_var").is_some());
    }

    #[test]
    fn global_assignment_updates_the_found_binding() {
        let mut env = env();
        env.set_local("x", Value::Int(1));
        push_call(&mut env);
        env.set_global("x", Value::Int(5));
        env.pop_frame();
        assert!(env.get_global("x").unwrap().is_equal(&Value::Int(5)));
    }

    #[test]
    fn global_assignment_creates_at_root_when_absent() {
        let mut env = env();
        push_call(&mut env);
        env.set_global("fresh", Value::Int(7));
        env.pop_frame();
        assert!(env.get_global("fresh").unwrap().is_equal(&Value::Int(7)));
    }
}
